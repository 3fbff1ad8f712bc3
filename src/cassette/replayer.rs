//! Replays recorded interactions from a cassette.

use std::collections::HashMap;

use super::format::{Cassette, Interaction};

/// Replays interactions from a loaded cassette, serving them sequentially
/// per method.
///
/// Calls to different methods may interleave differently from the recording;
/// calls to the same method must arrive in recorded order with the recorded
/// arguments.
pub struct CassetteReplayer {
    /// Per-method queue of interactions (in order).
    queues: HashMap<String, Vec<Interaction>>,
    /// Per-method cursor tracking position.
    cursors: HashMap<String, usize>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut queues: HashMap<String, Vec<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            queues.entry(interaction.method.clone()).or_default().push(interaction.clone());
        }
        let cursors = queues.keys().map(|k| (k.clone(), 0)).collect();
        Self { queues, cursors }
    }

    /// Return the next interaction for `method`, checking it was recorded
    /// with the same `input`.
    ///
    /// A failed lookup does not advance the cursor.
    ///
    /// # Errors
    ///
    /// Returns a message showing what was requested versus what the cassette
    /// holds if it has no (more) interactions for the method, or if the next
    /// one was recorded with different arguments.
    pub fn next_interaction(
        &mut self,
        method: &str,
        input: &serde_json::Value,
    ) -> Result<&Interaction, String> {
        let Some(queue) = self.queues.get(method) else {
            let mut available: Vec<&str> = self.queues.keys().map(String::as_str).collect();
            available.sort_unstable();
            return Err(format!(
                "Cassette exhausted: no interactions recorded for method={method:?}. \
                 Available methods: [{}]",
                available.join(", ")
            ));
        };

        let cursor = self.cursors.entry(method.to_string()).or_insert(0);
        let Some(interaction) = queue.get(*cursor) else {
            return Err(format!(
                "Cassette exhausted: all {count} interactions for method={method:?} \
                 have been consumed. Last interaction was seq={last_seq}.",
                count = queue.len(),
                last_seq = queue.last().map_or(0, |i| i.seq),
            ));
        };

        if interaction.input != *input {
            return Err(format!(
                "Cassette mismatch at seq={seq}: method={method:?} was recorded with {recorded} \
                 but called with {input}",
                seq = interaction.seq,
                recorded = interaction.input,
            ));
        }
        *cursor += 1;
        Ok(interaction)
    }

    /// Number of interactions not yet served, across all methods.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queues
            .iter()
            .map(|(method, queue)| queue.len() - self.cursors.get(method).copied().unwrap_or(0))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            base_url: "https://t.example/".into(),
            interactions,
        }
    }

    fn interaction(seq: u64, method: &str, input: serde_json::Value) -> Interaction {
        Interaction { seq, method: method.into(), input, output: json!({"Ok": seq}) }
    }

    #[test]
    fn serves_each_method_in_recorded_order() {
        let cassette = make_cassette(vec![
            interaction(0, "find_identities", json!({"alias": "P1"})),
            interaction(1, "list_accounts", json!({"identity_id": "id-1"})),
            interaction(2, "find_identities", json!({"alias": "P2"})),
        ]);
        let mut replayer = CassetteReplayer::new(&cassette);
        assert_eq!(replayer.remaining(), 3);

        let first = replayer.next_interaction("find_identities", &json!({"alias": "P1"})).unwrap();
        assert_eq!(first.seq, 0);
        let accounts =
            replayer.next_interaction("list_accounts", &json!({"identity_id": "id-1"})).unwrap();
        assert_eq!(accounts.seq, 1);
        let second = replayer.next_interaction("find_identities", &json!({"alias": "P2"})).unwrap();
        assert_eq!(second.output, json!({"Ok": 2}));
        assert_eq!(replayer.remaining(), 0);
    }

    #[test]
    fn exhausted_method_is_an_error() {
        let cassette = make_cassette(vec![interaction(0, "get_role", json!({"role_id": "r1"}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        assert!(replayer.next_interaction("get_role", &json!({"role_id": "r1"})).is_ok());

        let err = replayer.next_interaction("get_role", &json!({"role_id": "r1"})).unwrap_err();
        assert!(err.starts_with("Cassette exhausted: all 1 interactions"), "{err}");
        assert!(err.contains("seq=0"), "{err}");
    }

    #[test]
    fn unknown_method_lists_available_methods() {
        let cassette = make_cassette(vec![interaction(0, "list_accounts", json!({}))]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let err = replayer.next_interaction("get_role", &json!({})).unwrap_err();
        assert!(err.contains("no interactions recorded for method=\"get_role\""), "{err}");
        assert!(err.contains("[list_accounts]"), "{err}");
    }

    #[test]
    fn different_arguments_are_an_error_and_keep_the_cursor() {
        let cassette =
            make_cassette(vec![interaction(0, "find_identities", json!({"alias": "P1"}))]);
        let mut replayer = CassetteReplayer::new(&cassette);

        let err =
            replayer.next_interaction("find_identities", &json!({"alias": "P9"})).unwrap_err();
        assert!(err.starts_with("Cassette mismatch at seq=0"), "{err}");
        assert_eq!(replayer.remaining(), 1);

        assert!(replayer.next_interaction("find_identities", &json!({"alias": "P1"})).is_ok());
        assert_eq!(replayer.remaining(), 0);
    }
}
