//! Command-line interface for the Pathfinder route-sequencing engine.
//!
//! `pathfinder solve <request.json>` reads a `{warehouse, stops}` request,
//! orders the stops and prints the result as JSON on stdout.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use log::LevelFilter;

mod error;
mod fs;
mod logging;
mod output;
mod solve;

pub use error::CliError;

use solve::{SolveArgs, run_solve};

pub(crate) const ARG_SOLVE_REQUEST: &str = "request";
pub(crate) const ARG_SOLVE_API: &str = "api";
pub(crate) const ARG_SOLVE_BASE_URL: &str = "base-url";
pub(crate) const ARG_SOLVE_PROFILE: &str = "profile";
pub(crate) const ARG_SOLVE_ACCESS_TOKEN: &str = "access-token";
pub(crate) const ARG_SOLVE_AVERAGE_SPEED: &str = "average-speed-kmh";
pub(crate) const ARG_SOLVE_SKIP_GEOMETRY: &str = "skip-geometry";
pub(crate) const ENV_SOLVE_REQUEST: &str = "PATHFINDER_CMDS_SOLVE_REQUEST_PATH";
pub(crate) const ENV_SOLVE_ACCESS_TOKEN: &str = "PATHFINDER_CMDS_SOLVE_ACCESS_TOKEN";
/// Fallback variable for the Mapbox token, shared with other Mapbox tools.
pub(crate) const ENV_MAPBOX_ACCESS_TOKEN: &str = "MAPBOX_ACCESS_TOKEN";

/// Run the Pathfinder CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, the
/// request cannot be read, or no feasible route exists.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    logging::init_logger(cli.log_level)?;
    match cli.command {
        Command::Solve(args) => run_solve(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "pathfinder",
    about = "Order delivery stops into a single-vehicle route under time windows",
    version
)]
struct Cli {
    /// Diagnostic log level written to stderr.
    #[arg(long, global = true, value_name = "level", default_value_t = LevelFilter::Warn)]
    log_level: LevelFilter,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sequence the stops of a JSON request.
    Solve(SolveArgs),
}

#[cfg(test)]
mod tests;
