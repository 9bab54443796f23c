//! Replays recorded interactions from a cassette.

use std::collections::HashMap;
use std::path::Path;

use super::format::{Cassette, Interaction};

/// Key for indexing interactions by port and method.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
struct PortMethodKey {
    port: String,
    method: String,
}

/// Serves interactions from a loaded cassette, in recorded order per
/// port/method pair.
///
/// Calls to different port/method pairs may interleave differently than
/// during recording; calls to the same pair must happen in the same order.
pub struct CassetteReplayer {
    queues: HashMap<PortMethodKey, Vec<Interaction>>,
    cursors: HashMap<PortMethodKey, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<PortMethodKey, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            let key = PortMethodKey {
                port: interaction.port.clone(),
                method: interaction.method.clone(),
            };
            queues.entry(key).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Load a cassette file and create a replayer for it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette = Cassette::from_yaml(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Return the recorded output of the next call to `port::method`.
    ///
    /// # Panics
    ///
    /// Panics if the cassette has no (more) interactions for the given
    /// port/method combination, naming what was requested and what the
    /// cassette does contain.
    pub fn next_output(&mut self, port: &str, method: &str) -> serde_json::Value {
        let key = PortMethodKey { port: port.to_string(), method: method.to_string() };

        let queue = self.queues.get(&key).unwrap_or_else(|| {
            let mut available: Vec<String> =
                self.queues.keys().map(|k| format!("{}::{}", k.port, k.method)).collect();
            available.sort();
            panic!(
                "Cassette exhausted: no interactions recorded for port={port:?} method={method:?}. \
                 Available port::method pairs: [{}]",
                available.join(", ")
            );
        });

        let cursor = self.cursors.get_mut(&key).expect("cursor must exist");
        assert!(
            *cursor < queue.len(),
            "Cassette exhausted: all {count} interactions for port={port:?} method={method:?} \
             have been consumed. Last interaction was seq={last_seq}.",
            count = queue.len(),
            last_seq = queue.last().map_or(0, |i| i.seq),
        );

        let output = queue[*cursor].output.clone();
        *cursor += 1;
        output
    }

    /// Number of recorded interactions not yet replayed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues.iter().map(|(key, queue)| queue.len() - self.cursors[key]).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn interaction(seq: u64, port: &str, method: &str, output: serde_json::Value) -> Interaction {
        Interaction { seq, port: port.into(), method: method.into(), input: json!(null), output }
    }

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            version: "0.0.0".into(),
            interactions,
        }
    }

    #[test]
    fn serves_each_port_method_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "tasks", "list_todos", json!({"Ok": []})),
            interaction(1, "tasks", "create_todo", json!({"Ok": null})),
            interaction(2, "tasks", "list_todos", json!({"Ok": [{"id": "a", "text": "X (1 of 3)"}]})),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining(), 3);

        // Out-of-order across methods is fine.
        assert_eq!(replayer.next_output("tasks", "create_todo"), json!({"Ok": null}));
        assert_eq!(replayer.next_output("tasks", "list_todos"), json!({"Ok": []}));
        let second = replayer.next_output("tasks", "list_todos");
        assert_eq!(second["Ok"][0]["text"], "X (1 of 3)");
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn exhausted_replayer_panics_with_descriptive_message() {
        let cassette = make_cassette(vec![interaction(0, "clock", "now", json!("x"))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_output("clock", "now");
        let _ = replayer.next_output("clock", "now");
    }

    #[test]
    #[should_panic(expected = "no interactions recorded")]
    fn unknown_port_panics() {
        let mut replayer = CassetteReplayer::new(&make_cassette(vec![]));
        let _ = replayer.next_output("unknown", "method");
    }
}
