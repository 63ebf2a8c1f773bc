use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("destination rejected message: {0}")]
    Rejected(String),
}

/// Outbound delivery channel for a composed digest.
///
/// Best-effort by contract: a failure is reported to the caller for
/// logging, never retried within the run, and never fatal to the
/// process.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}
