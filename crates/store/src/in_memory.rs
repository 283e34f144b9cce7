use async_trait::async_trait;
use dashmap::DashMap;
use delta_core::{DetectorState, Identifier};
use delta_ports::{StateStore, StoreResult};
use log::trace;
use std::sync::Arc;

/// In-memory state store, one entry per identifier
///
/// Clones share the same map, so a node and a test (or several nodes fed
/// from disjoint identifier sets) can observe the same state.
pub struct InMemoryStateStore {
    states: Arc<DashMap<Identifier, DetectorState>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        InMemoryStateStore {
            states: Arc::new(DashMap::new()),
        }
    }

    /// Create pre-seeded with states (for testing)
    pub fn with_states<I>(states: I) -> Self
    where
        I: IntoIterator<Item = (Identifier, DetectorState)>,
    {
        let store = Self::new();
        for (identifier, state) in states {
            store.states.insert(identifier, state);
        }
        store
    }

    /// Get the state for an identifier (sync)
    pub fn get_state(&self, identifier: &str) -> Option<DetectorState> {
        self.states.get(identifier).map(|s| *s)
    }

    /// Overwrite the state for an identifier (sync)
    pub fn insert(&self, identifier: impl Into<Identifier>, state: DetectorState) {
        self.states.insert(identifier.into(), state);
    }

    /// Drop the state for an identifier, returning it
    pub fn remove(&self, identifier: &str) -> Option<DetectorState> {
        self.states.remove(identifier).map(|(_, state)| state)
    }

    /// Number of identifiers with state
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Copy of every entry, sorted by identifier
    pub fn snapshot(&self) -> Vec<(Identifier, DetectorState)> {
        let mut entries: Vec<_> = self
            .states
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for InMemoryStateStore {
    fn clone(&self) -> Self {
        InMemoryStateStore {
            states: Arc::clone(&self.states),
        }
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, identifier: &str) -> StoreResult<Option<DetectorState>> {
        Ok(self.get_state(identifier))
    }

    async fn set(&self, identifier: &str, state: DetectorState) -> StoreResult<()> {
        trace!(
            "state[{}] := ts={} value={}",
            identifier, state.timestamp, state.value
        );
        self.states.insert(identifier.to_string(), state);
        Ok(())
    }

    fn name(&self) -> &str {
        "InMemoryStateStore"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(timestamp: f64, value: f64) -> DetectorState {
        DetectorState { timestamp, value }
    }

    #[tokio::test]
    async fn test_get_absent() {
        let store = InMemoryStateStore::new();
        assert_eq!(store.get("topic").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = InMemoryStateStore::new();
        store.set("topic", state(100.0, 100.0)).await.unwrap();
        store.set("topic", state(110.0, 120.0)).await.unwrap();

        assert_eq!(store.get("topic").await.unwrap(), Some(state(110.0, 120.0)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let store = InMemoryStateStore::with_states([
            ("a".to_string(), state(1.0, 1.0)),
            ("b".to_string(), state(2.0, 2.0)),
        ]);
        store.set("a", state(3.0, 3.0)).await.unwrap();

        assert_eq!(store.get_state("b"), Some(state(2.0, 2.0)));
        assert_eq!(
            store.snapshot(),
            vec![
                ("a".to_string(), state(3.0, 3.0)),
                ("b".to_string(), state(2.0, 2.0)),
            ]
        );
    }

    #[test]
    fn test_clones_share_state() {
        let store = InMemoryStateStore::new();
        let view = store.clone();

        store.insert("topic", state(5.0, 5.0));
        assert_eq!(view.get_state("topic"), Some(state(5.0, 5.0)));

        assert_eq!(view.remove("topic"), Some(state(5.0, 5.0)));
        assert!(store.is_empty());
    }
}
