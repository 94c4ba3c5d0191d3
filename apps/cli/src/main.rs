//! `rodada` binary. Setup lives in the library for testability.

fn main() {
    std::process::exit(rodada_cli::run());
}
