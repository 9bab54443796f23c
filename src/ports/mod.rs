//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the reconciliation core and an
//! external system (time, run ids, local files, the remote task service).
//! Implementations live in `src/adapters/`.

pub mod clock;
pub mod filesystem;
pub mod id_gen;
pub mod tasks;

pub use clock::Clock;
pub use filesystem::FileSystem;
pub use id_gen::IdGenerator;
pub use tasks::{NewTask, RemoteTask, RemoteTasks, TaskFuture};
