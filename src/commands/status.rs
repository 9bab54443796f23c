//! `cadence status` command.

use std::fmt::Write as _;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::ledger::LedgerStore;
use crate::schedule::dates::{is_reset_boundary, parse_day_key};
use crate::schedule::load_definitions;

/// Execute the `status` command.
///
/// Prints a table of every definition with its progress and last reset
/// day, followed by ledger entries no definition refers to any more.
///
/// # Errors
///
/// Returns an error string if the schedule cannot be read.
pub fn run(config: &Config) -> Result<(), String> {
    let ctx = ServiceContext::offline();
    println!("{}", render(&ctx, config)?);
    Ok(())
}

/// Builds the status table without printing it.
///
/// # Errors
///
/// Returns an error string if the schedule cannot be read.
pub fn render(ctx: &ServiceContext, config: &Config) -> Result<String, String> {
    let definitions = load_definitions(ctx.fs.as_ref(), &config.schedule_path)?;
    if definitions.is_empty() {
        return Ok(format!("No definitions found in {}.", config.schedule_path.display()));
    }
    let ledger = LedgerStore::new(ctx.fs.as_ref(), &config.ledger_path).load();
    let today = ctx.clock.now().date_naive();

    let rows: Vec<(String, String, String)> = definitions
        .iter()
        .map(|definition| {
            let key = definition.identity_key();
            let record = ledger.get(&key);
            let mut progress = format!("{}/{}", record.progress, definition.target_frequency);
            let pending_reset = is_reset_boundary(&definition.period, &record.last_reset, today);
            if ledger.contains(&key) && pending_reset {
                progress.push_str(" (resets on next run)");
            }
            let last_reset = if record.last_reset.is_empty() {
                "never".to_string()
            } else if parse_day_key(&record.last_reset).is_some() {
                record.last_reset
            } else {
                format!("{} (unreadable)", record.last_reset)
            };
            (key, progress, last_reset)
        })
        .collect();

    let key_width = rows.iter().map(|r| r.0.len()).max().unwrap_or(3).max(3);
    let progress_width = rows.iter().map(|r| r.1.len()).max().unwrap_or(8).max(8);

    let mut out = String::new();
    let _ = writeln!(out, "{:<key_width$}  {:<progress_width$}  LAST RESET", "KEY", "PROGRESS");
    let _ = writeln!(out, "{:-<key_width$}  {:-<progress_width$}  {:-<10}", "", "", "");
    for (key, progress, last_reset) in &rows {
        let _ = writeln!(out, "{key:<key_width$}  {progress:<progress_width$}  {last_reset}");
    }

    let orphans: Vec<&str> = ledger
        .iter()
        .map(|(key, _)| key)
        .filter(|key| !rows.iter().any(|row| row.0 == *key))
        .collect();
    if !orphans.is_empty() {
        let _ = writeln!(out, "\nLedger entries without a definition:");
        for key in orphans {
            let _ = writeln!(out, "  {key}");
        }
    }

    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeTasks, FixedClock, MemFs};

    fn config() -> Config {
        Config::from_lookup(|name| match name {
            "CADENCE_SCHEDULE" => Some("/home/schedule.txt".into()),
            "CADENCE_LEDGER" => Some("/home/ledger.json".into()),
            _ => None,
        })
        .unwrap()
    }

    fn context(today: &str, fs: MemFs) -> ServiceContext {
        ServiceContext::new(Box::new(FixedClock::on(today)), Box::new(fs), Box::new(FakeTasks::new()))
    }

    #[test]
    fn shows_progress_and_never_for_untracked_definitions() {
        let fs = MemFs::new();
        fs.insert("/home/schedule.txt", "Read a book, 3, week\nWater plants, 5, month\n");
        fs.insert(
            "/home/ledger.json",
            r#"{"Read a book / 3 times week": {"progress": 2, "lastReset": "2024-06-10"}}"#,
        );

        let out = render(&context("2024-06-12", fs), &config()).unwrap();

        assert!(out.contains("Read a book / 3 times week"));
        assert!(out.contains("2/3"));
        assert!(out.contains("2024-06-10"));
        assert!(out.contains("0/5"));
        assert!(out.contains("never"));
        assert!(!out.contains("resets on next run"));
    }

    #[test]
    fn flags_pending_reset_on_a_boundary_day() {
        let fs = MemFs::new();
        fs.insert("/home/schedule.txt", "Read a book, 3, week\n");
        fs.insert(
            "/home/ledger.json",
            r#"{"Read a book / 3 times week": {"progress": 3, "lastReset": "2024-06-10"}}"#,
        );

        // 2024-06-17 is the following Monday.
        let out = render(&context("2024-06-17", fs), &config()).unwrap();
        assert!(out.contains("3/3 (resets on next run)"));
    }

    #[test]
    fn marks_unreadable_reset_days() {
        let fs = MemFs::new();
        fs.insert("/home/schedule.txt", "Read a book, 3, week\n");
        fs.insert(
            "/home/ledger.json",
            r#"{"Read a book / 3 times week": {"progress": 1, "lastReset": "last monday"}}"#,
        );

        let out = render(&context("2024-06-12", fs), &config()).unwrap();
        assert!(out.contains("last monday (unreadable)"));
    }

    #[test]
    fn lists_orphaned_ledger_entries() {
        let fs = MemFs::new();
        fs.insert("/home/schedule.txt", "Read a novel, 3, week\n");
        fs.insert(
            "/home/ledger.json",
            r#"{"Read a book / 3 times week": {"progress": 1, "lastReset": "2024-06-10"}}"#,
        );

        let out = render(&context("2024-06-12", fs), &config()).unwrap();
        assert!(out.contains("Ledger entries without a definition:\n  Read a book / 3 times week"));
    }

    #[test]
    fn empty_schedule_says_so() {
        let fs = MemFs::new();
        fs.insert("/home/schedule.txt", "# nothing yet\n");
        let out = render(&context("2024-06-12", fs), &config()).unwrap();
        assert_eq!(out, "No definitions found in /home/schedule.txt.");
    }

    #[test]
    fn missing_schedule_is_an_error() {
        assert!(render(&context("2024-06-12", MemFs::new()), &config()).is_err());
    }
}
