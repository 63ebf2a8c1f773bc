pub mod json_store;

use std::time::SystemTime;

use crate::model::AlertedSet;

#[derive(thiserror::Error, Debug)]
pub enum LedgerError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[async_trait::async_trait]
pub trait LedgerStore: Send + Sync {
    /// Load the persisted set. Missing or unreadable state loads as an
    /// empty set, never an error: the worst outcome is a repeat alert.
    async fn load(&self) -> AlertedSet;

    /// Persist the set. Must be atomic with respect to a single writer.
    async fn save(&self, set: &AlertedSet) -> Result<(), LedgerError>;

    /// When the persisted state was last written, if any exists.
    async fn last_written(&self) -> Option<SystemTime>;
}
