//! Identifier generator.
//!
//! Keys are `max(existing) + 1`, or `1` for an empty collection. Records are
//! never deleted, so a key is never handed out twice. Once `u32::MAX` is taken
//! there is no next key.

/// A record with a numeric primary key.
pub trait Keyed {
    fn key(&self) -> u32;
}

/// Returns the next free key for `records`, or `None` when keys ran out.
pub fn next_key<T: Keyed>(records: &[T]) -> Option<u32> {
    match records.iter().map(Keyed::key).max() {
        None => Some(1),
        Some(max) => max.checked_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(u32);

    impl Keyed for Row {
        fn key(&self) -> u32 {
            self.0
        }
    }

    #[test]
    fn test_empty_collection_starts_at_one() {
        assert_eq!(next_key::<Row>(&[]), Some(1));
    }

    #[test]
    fn test_uses_max_not_len() {
        // Gaps and ordering don't matter, only the largest key.
        assert_eq!(next_key(&[Row(4), Row(2), Row(9)]), Some(10));
    }

    #[test]
    fn test_exhausted_key_space_is_not_reused() {
        assert_eq!(next_key(&[Row(u32::MAX - 1)]), Some(u32::MAX));
        assert_eq!(next_key(&[Row(3), Row(u32::MAX)]), None);
    }
}
