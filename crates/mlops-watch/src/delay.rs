//! Delay between polls.

use async_trait::async_trait;
use std::time::Duration;

/// Waits between two status queries. Swapped out in tests so the loop runs
/// without wall-clock waits.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real delay backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
