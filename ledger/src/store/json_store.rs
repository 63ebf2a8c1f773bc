//! JsonFileStore
//! --------------
//! File-backed implementation of the `LedgerStore` trait. The on-disk
//! format is a single JSON array of ticker symbols, e.g.
//!
//!   ["AAPL","NVDA","XYZ"]
//!
//! Durability rules:
//!
//!  - a missing file is a first run and loads as an empty set
//!  - a corrupt file loads as an empty set (repeat alerts beat a crash)
//!  - saves go through a temp file + rename, so a reader never sees a
//!    half-written array

use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::SystemTime;

use async_trait::async_trait;
use tracing::warn;

use super::{LedgerError, LedgerStore};
use crate::model::AlertedSet;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut os = self.path.clone().into_os_string();
        os.push(".tmp");
        PathBuf::from(os)
    }
}

#[async_trait]
impl LedgerStore for JsonFileStore {
    async fn load(&self) -> AlertedSet {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return AlertedSet::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "alert ledger unreadable, starting empty");
                return AlertedSet::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(set) => set,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "alert ledger corrupt, starting empty");
                AlertedSet::new()
            }
        }
    }

    async fn save(&self, set: &AlertedSet) -> Result<(), LedgerError> {
        let bytes = serde_json::to_vec(set)?;
        let tmp = self.tmp_path();

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }

    async fn last_written(&self) -> Option<SystemTime> {
        tokio::fs::metadata(&self.path).await.ok()?.modified().ok()
    }
}
