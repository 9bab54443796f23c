//! Replaying adapter for the `IdGenerator` port.

use std::sync::{Arc, Mutex};

use super::next_value;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::IdGenerator;

/// Hands back the run ids recorded in a cassette.
pub struct ReplayingIdGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingIdGenerator {
    /// Creates a replaying id generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl IdGenerator for ReplayingIdGenerator {
    fn generate_id(&self) -> String {
        next_value(&self.replayer, "id_gen", "generate_id")
    }
}
