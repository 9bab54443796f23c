//! Reconciliation of recurrence definitions against the remote todo list.

pub mod engine;
pub mod labels;
pub mod mirror;

pub use engine::{
    format_reports, reconcile_all, reconcile_definition, run_pass, DefinitionReport, Outcome,
    PassConfig,
};
pub use mirror::RemoteTaskMirror;
