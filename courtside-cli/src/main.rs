//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

#[expect(clippy::print_stderr, reason = "report fatal errors to the user")]
fn main() {
    if let Err(err) = courtside_cli::run() {
        eprintln!("courtside: {err}");
        std::process::exit(1);
    }
}
