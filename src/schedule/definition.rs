//! Parsing the recurrence schedule into task definitions.
//!
//! The schedule is a plain text block, one definition per line:
//!
//! ```text
//! # name, frequency, period
//! Empty trashcan, 3, week
//! Water the plants, 5, month
//! ```
//!
//! Blank lines and `#` comments are ignored. Malformed lines are logged and
//! skipped; they never abort loading.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, warn};

use super::period::Period;
use crate::ports::FileSystem;

/// A declared recurring task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDefinition {
    /// Display name, also the prefix of every instance label.
    pub name: String,
    /// Instances required per cycle. Always at least 1.
    pub target_frequency: u32,
    /// Cycle length.
    pub period: Period,
}

impl TaskDefinition {
    /// Stable ledger key derived from name, frequency and period.
    ///
    /// Definitions that agree on all three fields share progress.
    #[must_use]
    pub fn identity_key(&self) -> String {
        format!("{} / {} times {}", self.name, self.target_frequency, self.period)
    }
}

/// Why a schedule line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LineError {
    /// Fewer than three comma-separated fields.
    #[error("expected 3 fields, found {0}")]
    TooFewFields(usize),
    /// The name field is empty.
    #[error("name is empty")]
    EmptyName,
    /// The frequency is not a positive integer.
    #[error("frequency {0:?} is not a positive integer")]
    BadFrequency(String),
}

/// Parses one non-comment schedule line.
///
/// # Errors
///
/// Returns a [`LineError`] describing why the line cannot be used.
pub fn parse_line(line: &str) -> Result<TaskDefinition, LineError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() < 3 {
        return Err(LineError::TooFewFields(fields.len()));
    }
    let name = fields[0];
    if name.is_empty() {
        return Err(LineError::EmptyName);
    }
    let target_frequency = match fields[1].parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => return Err(LineError::BadFrequency(fields[1].to_string())),
    };
    let period = Period::parse(fields[2]);
    if !period.is_known() {
        warn!(name, period = %period, "unknown period; instances will be due on the day they are posted");
    }
    Ok(TaskDefinition { name: name.to_string(), target_frequency, period })
}

/// Parses a whole schedule, keeping declaration order.
#[must_use]
pub fn parse_definitions(text: &str) -> Vec<TaskDefinition> {
    let mut definitions = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Ok(definition) => {
                debug!(key = %definition.identity_key(), "loaded definition");
                definitions.push(definition);
            }
            Err(err) => warn!(line_number = index + 1, line, reason = %err, "skipping schedule line"),
        }
    }
    definitions
}

/// Reads and parses the schedule file at `path`.
///
/// # Errors
///
/// Returns an error string if the file cannot be read.
pub fn load_definitions(fs: &dyn FileSystem, path: &Path) -> Result<Vec<TaskDefinition>, String> {
    let text = fs
        .read_to_string(path)
        .map_err(|e| format!("Failed to read schedule {}: {e}", path.display()))?;
    Ok(parse_definitions(&text))
}
