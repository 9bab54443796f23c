//! Recurrence definitions and the calendar rules that drive their cycles.

pub mod dates;
pub mod definition;
pub mod period;

pub use definition::{load_definitions, parse_definitions, TaskDefinition};
pub use period::Period;
