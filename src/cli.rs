//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI parser for `cadence`.
#[derive(Debug, Parser)]
#[command(name = "cadence", version, about = "Keep recurring Habitica todos in step with a schedule")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Overrides for the schedule and ledger locations.
#[derive(Debug, Clone, Default, Args)]
pub struct PathArgs {
    /// Recurrence schedule file (overrides `CADENCE_SCHEDULE`).
    #[arg(long, value_name = "PATH")]
    pub schedule: Option<PathBuf>,
    /// Ledger file (overrides `CADENCE_LEDGER`).
    #[arg(long, value_name = "PATH")]
    pub ledger: Option<PathBuf>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one reconciliation pass against the remote todo list.
    Run {
        /// Report decisions without posting, deleting or saving progress.
        #[arg(long)]
        dry_run: bool,
        #[command(flatten)]
        paths: PathArgs,
    },
    /// Show per-definition progress from the ledger. Makes no remote calls.
    Status {
        #[command(flatten)]
        paths: PathArgs,
    },
    /// List the parsed definitions and their identity keys.
    Definitions {
        /// Recurrence schedule file (overrides `CADENCE_SCHEDULE`).
        #[arg(long, value_name = "PATH")]
        schedule: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn parses_run_with_dry_run_and_paths() {
        let cli = Cli::parse_from([
            "cadence",
            "run",
            "--dry-run",
            "--schedule",
            "s.txt",
            "--ledger",
            "l.json",
        ]);
        match cli.command {
            Command::Run { dry_run, paths } => {
                assert!(dry_run);
                assert_eq!(paths.schedule.as_deref(), Some(Path::new("s.txt")));
                assert_eq!(paths.ledger.as_deref(), Some(Path::new("l.json")));
            }
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn run_defaults_to_a_real_pass() {
        let cli = Cli::parse_from(["cadence", "run"]);
        assert!(matches!(cli.command, Command::Run { dry_run: false, .. }));
    }

    #[test]
    fn parses_status_and_definitions() {
        let cli = Cli::parse_from(["cadence", "status", "--ledger", "l.json"]);
        assert!(matches!(cli.command, Command::Status { .. }));

        let cli = Cli::parse_from(["cadence", "definitions"]);
        assert!(matches!(cli.command, Command::Definitions { schedule: None }));
    }

    #[test]
    fn definitions_rejects_ledger_flag() {
        assert!(Cli::try_parse_from(["cadence", "definitions", "--ledger", "l.json"]).is_err());
    }
}
