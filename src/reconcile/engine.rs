//! The per-definition state machine and the full reconciliation pass.
//!
//! For each definition, in declaration order:
//!
//! 1. On a cycle boundary, zero the progress, stamp today's day key and
//!    delete every open instance of the definition.
//! 2. Stop once the cycle's target is reached.
//! 3. Stop if the next instance is already open.
//! 4. Stop while the previous instance is still open, so a definition never
//!    has two open instances.
//! 5. Post the next instance; advance progress only on confirmed creation.
//!
//! Failures are local to one definition and surface as [`Outcome`] values.

use std::fmt::Write as _;
use std::path::PathBuf;

use chrono::{NaiveDate, TimeDelta};
use tracing::{debug, info, warn};

use super::labels::instance_label;
use super::mirror::RemoteTaskMirror;
use crate::context::ServiceContext;
use crate::ledger::lease::lease_path;
use crate::ledger::{Ledger, LedgerStore, ProgressRecord, RunLease};
use crate::ports::NewTask;
use crate::schedule::dates::{day_key, due_date, is_reset_boundary};
use crate::schedule::{load_definitions, TaskDefinition};

/// What a pass decided for one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every instance of the cycle has been posted.
    TargetReached,
    /// The next instance is already open.
    AlreadyPosted {
        /// Label of the open instance.
        label: String,
    },
    /// The previous instance is still open.
    AwaitingPrevious {
        /// Label of the instance waiting to be completed.
        label: String,
    },
    /// The next instance was created.
    Posted {
        /// Label of the new instance.
        label: String,
        /// Its due date.
        due: NaiveDate,
    },
    /// Dry run: the next instance would have been created.
    WouldPost {
        /// Label of the instance.
        label: String,
        /// Its due date.
        due: NaiveDate,
    },
    /// Creation was attempted and not confirmed; retried on the next run.
    PostFailed {
        /// Label of the instance.
        label: String,
        /// Remote error description.
        reason: String,
    },
}

/// Result of reconciling one definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionReport {
    /// Ledger key of the definition.
    pub key: String,
    /// Whether the cycle was reset during this pass.
    pub reset: bool,
    /// Stale instances deleted by the reset.
    pub removed: usize,
    /// Progress after the pass.
    pub progress: u32,
    /// Target per cycle.
    pub target: u32,
    /// The decision taken.
    pub outcome: Outcome,
}

/// Inputs of a full pass.
#[derive(Debug, Clone)]
pub struct PassConfig {
    /// Recurrence schedule file.
    pub schedule: PathBuf,
    /// Ledger file.
    pub ledger: PathBuf,
    /// Age after which another run's lease is considered abandoned.
    pub lease_ttl: TimeDelta,
    /// Report decisions without mutating the remote or the ledger.
    pub dry_run: bool,
}

/// Runs one reconciliation pass end to end.
///
/// Takes the run lease (unless dry-running), loads definitions, ledger and
/// the remote snapshot, reconciles every definition and saves the ledger
/// once at the end.
///
/// # Errors
///
/// Returns an error if the schedule cannot be read, the lease is held by
/// another run, or the ledger cannot be saved. Remote failures are never
/// errors; they are reported per definition.
pub async fn run_pass(
    ctx: &ServiceContext,
    config: &PassConfig,
) -> Result<Vec<DefinitionReport>, String> {
    let now = ctx.clock.now();
    let today = now.date_naive();
    let definitions = load_definitions(ctx.fs.as_ref(), &config.schedule)?;
    if definitions.is_empty() {
        warn!(schedule = %config.schedule.display(), "schedule has no usable definitions");
    }

    let lease = if config.dry_run {
        None
    } else {
        let path = lease_path(&config.ledger);
        Some(
            RunLease::acquire(ctx.fs.as_ref(), &path, ctx.ids.generate_id(), now, config.lease_ttl)
                .map_err(|e| format!("Cannot start run: {e}"))?,
        )
    };

    let store = LedgerStore::new(ctx.fs.as_ref(), &config.ledger);
    let mut ledger = store.load();
    let mut mirror = RemoteTaskMirror::load(ctx.tasks.as_ref(), config.dry_run).await;

    info!(today = %day_key(today), definitions = definitions.len(), dry_run = config.dry_run, "starting pass");
    let reports = reconcile_all(&definitions, &mut ledger, &mut mirror, today).await;

    if !config.dry_run {
        store.save(&ledger)?;
    }
    if let Some(lease) = lease {
        lease.release();
    }
    Ok(reports)
}

/// Reconciles every definition in order, reading and writing back its
/// ledger record.
pub async fn reconcile_all(
    definitions: &[TaskDefinition],
    ledger: &mut Ledger,
    mirror: &mut RemoteTaskMirror<'_>,
    today: NaiveDate,
) -> Vec<DefinitionReport> {
    let mut reports = Vec::with_capacity(definitions.len());
    for definition in definitions {
        let key = definition.identity_key();
        let mut record = ledger.get(&key);
        let report = reconcile_definition(definition, &mut record, mirror, today).await;
        ledger.put(key, record);
        reports.push(report);
    }
    reports
}

/// Applies the state machine to one definition.
pub async fn reconcile_definition(
    definition: &TaskDefinition,
    record: &mut ProgressRecord,
    mirror: &mut RemoteTaskMirror<'_>,
    today: NaiveDate,
) -> DefinitionReport {
    let mut reset = false;
    let mut removed = 0;
    if is_reset_boundary(&definition.period, &record.last_reset, today) {
        info!(definition = %definition.name, period = %definition.period, "new cycle, resetting progress");
        record.progress = 0;
        record.last_reset = day_key(today);
        removed = mirror.remove_instances_of(&definition.name).await;
        reset = true;
    }

    let outcome = advance(definition, record, mirror, today).await;
    DefinitionReport {
        key: definition.identity_key(),
        reset,
        removed,
        progress: record.progress,
        target: definition.target_frequency,
        outcome,
    }
}

async fn advance(
    definition: &TaskDefinition,
    record: &mut ProgressRecord,
    mirror: &mut RemoteTaskMirror<'_>,
    today: NaiveDate,
) -> Outcome {
    let target = definition.target_frequency;
    if record.progress >= target {
        debug!(definition = %definition.name, target, "target reached for this cycle");
        return Outcome::TargetReached;
    }

    let next = record.progress + 1;
    let expected = instance_label(&definition.name, next, target);
    if mirror.contains_label(&expected) {
        debug!(label = %expected, "next instance already open");
        return Outcome::AlreadyPosted { label: expected };
    }

    if record.progress > 0 {
        let previous = instance_label(&definition.name, record.progress, target);
        if mirror.contains_label(&previous) {
            debug!(label = %previous, "previous instance still open, waiting");
            return Outcome::AwaitingPrevious { label: previous };
        }
    }

    let due = due_date(&definition.period, today);
    let task = NewTask::todo(expected.clone(), day_key(due));
    match mirror.post(&task).await {
        Ok(()) => {
            record.progress = next;
            if mirror.is_dry_run() {
                Outcome::WouldPost { label: expected, due }
            } else {
                Outcome::Posted { label: expected, due }
            }
        }
        Err(err) => Outcome::PostFailed { label: expected, reason: err.to_string() },
    }
}

/// Formats pass results as a human-readable report.
#[must_use]
pub fn format_reports(reports: &[DefinitionReport]) -> String {
    if reports.is_empty() {
        return "No definitions to reconcile.".to_string();
    }

    let mut out = String::new();
    for report in reports {
        let progress = format!("{}/{}", report.progress, report.target);
        if report.reset {
            let _ = writeln!(out, "  RESET {} (removed {})", report.key, report.removed);
        }
        let line = match &report.outcome {
            Outcome::TargetReached => format!("  DONE {} [{progress}]", report.key),
            Outcome::AlreadyPosted { label } => format!("  OPEN {label} [{progress}]"),
            Outcome::AwaitingPrevious { label } => format!("  WAIT {label} [{progress}]"),
            Outcome::Posted { label, due } => {
                format!("  POSTED {label}, due {} [{progress}]", day_key(*due))
            }
            Outcome::WouldPost { label, due } => {
                format!("  WOULD POST {label}, due {} [{progress}]", day_key(*due))
            }
            Outcome::PostFailed { label, reason } => {
                format!("  FAILED {label}: {reason} [{progress}]")
            }
        };
        let _ = writeln!(out, "{line}");
    }
    out.trim_end().to_string()
}
