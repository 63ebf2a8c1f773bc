use async_trait::async_trait;
use thiserror::Error;

use crate::types::Quote;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("provider returned no data for {0}")]
    NoData(String),
}

/// Read-only market data provider.
///
/// Implementations fail per symbol: an error for one ticker carries no
/// meaning for the rest of the universe, and callers are expected to
/// keep going.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Latest snapshot for one ticker.
    async fn quote(&self, symbol: &str) -> Result<Quote, SourceError>;

    /// Daily closes for the trailing `days` sessions, oldest first.
    ///
    /// Used where a snapshot lacks the fast-path fields.
    async fn history(&self, symbol: &str, days: u32) -> Result<Vec<f64>, SourceError>;
}
