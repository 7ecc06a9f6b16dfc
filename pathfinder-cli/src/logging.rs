//! Diagnostic logging to stderr.

use std::io::Write;

use env_logger::{Builder, Target, WriteStyle};
use log::LevelFilter;

/// Install a stderr logger at `level`.
///
/// Stdout carries the JSON result, so log records never go there.
pub(crate) fn init_logger(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    Builder::new()
        .filter_level(level)
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init()
}
