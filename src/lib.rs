//! Core library entry for the `cadence` CLI.
//!
//! `cadence` turns a local recurrence schedule (for example "read 3 times a
//! week") into a trickle of numbered Habitica todos, one open instance at a
//! time, and resets progress at each calendar period boundary.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod ports;
pub mod reconcile;
pub mod schedule;

#[cfg(test)]
mod testing;

use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args).map_err(|err| err.to_string())?;
    commands::dispatch(&cli.command)
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["cadence", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_errors_without_subcommand() {
        assert!(run(["cadence"]).is_err());
    }
}
