//! `cadence definitions` command.

use std::fmt::Write as _;

use crate::config::Config;
use crate::context::ServiceContext;
use crate::schedule::{load_definitions, TaskDefinition};

/// Execute the `definitions` command.
///
/// # Errors
///
/// Returns an error string if the schedule cannot be read.
pub fn run(config: &Config) -> Result<(), String> {
    let ctx = ServiceContext::offline();
    println!("{}", list(&ctx, config)?);
    Ok(())
}

/// Loads the schedule through the context's filesystem and renders it.
///
/// # Errors
///
/// Returns an error string if the schedule cannot be read.
pub fn list(ctx: &ServiceContext, config: &Config) -> Result<String, String> {
    let definitions = load_definitions(ctx.fs.as_ref(), &config.schedule_path)?;
    if definitions.is_empty() {
        return Ok(format!("No definitions found in {}.", config.schedule_path.display()));
    }
    Ok(render(&definitions))
}

/// One line per definition: target, period and identity key.
#[must_use]
pub fn render(definitions: &[TaskDefinition]) -> String {
    let name_width = definitions.iter().map(|d| d.name.len()).max().unwrap_or(4).max(4);
    let mut out = String::new();
    let _ = writeln!(out, "{:<name_width$}  TARGET  PERIOD  KEY", "NAME");
    for definition in definitions {
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<6}  {:<6}  {}",
            definition.name,
            definition.target_frequency,
            definition.period,
            definition.identity_key(),
        );
    }
    out.trim_end().to_string()
}
