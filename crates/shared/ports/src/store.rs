use async_trait::async_trait;
use delta_core::DetectorState;

use crate::error::StoreResult;

/// Port for per-identifier detector state
///
/// Keyed read-modify-write: the caller reads once, and writes at most once
/// per message, only after an accepting verdict. No cross-key transactions
/// are required. Implementations may expire entries on their own.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Last accepted state for `identifier`, `None` if never accepted
    async fn get(&self, identifier: &str) -> StoreResult<Option<DetectorState>>;

    /// Replace the state for `identifier`
    async fn set(&self, identifier: &str, state: DetectorState) -> StoreResult<()>;

    /// Get the store's name for debugging
    fn name(&self) -> &str {
        "StateStore"
    }
}
