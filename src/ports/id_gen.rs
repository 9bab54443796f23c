//! Run id port.

/// Hands out an id for each run, written into the lease file it holds.
///
/// Behind a port so a replayed run gets the holder id it was recorded with.
pub trait IdGenerator: Send + Sync {
    /// Returns a fresh, unique run id.
    fn generate_id(&self) -> String;
}
