//! Command dispatch and handlers.

pub mod definitions;
pub mod run;
pub mod status;

use crate::cli::Command;
use crate::config::Config;

/// Dispatch a parsed command to its handler.
///
/// Configuration is read from the environment; path flags override it.
/// When `CADENCE_RECORD` is set to a directory, `run` records every port
/// interaction to a cassette in that directory.
///
/// # Errors
///
/// Returns an error string if configuration is invalid or the selected
/// command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let config = Config::from_env().map_err(|e| e.to_string())?;
    match command {
        Command::Run { dry_run, paths } => {
            let config = config.with_paths(paths.schedule.clone(), paths.ledger.clone());
            run::run(&config, *dry_run)
        }
        Command::Status { paths } => {
            let config = config.with_paths(paths.schedule.clone(), paths.ledger.clone());
            status::run(&config)
        }
        Command::Definitions { schedule } => {
            let config = config.with_paths(schedule.clone(), None);
            definitions::run(&config)
        }
    }
}
