//! Stdout delivery for dry runs: print the digest instead of pushing it.

use async_trait::async_trait;

use crate::notifier::{Notifier, NotifyError};

pub struct StdoutNotifier;

#[async_trait]
impl Notifier for StdoutNotifier {
    async fn send(&self, text: &str) -> Result<(), NotifyError> {
        println!("{text}");
        Ok(())
    }
}
