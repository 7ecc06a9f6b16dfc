//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use pathfinder_cli::CliError;

fn main() {
    match pathfinder_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("pathfinder: {err}");
            std::process::exit(1);
        }
    }
}
