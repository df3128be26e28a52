//! Simulated load latency.
//!
//! Non-initial page loads wait before returning to mimic a network round
//! trip. The wait goes through a [`LoadDelay`] so hosts and tests can swap
//! the timer.

use std::time::Duration;

use async_trait::async_trait;

/// Strategy used to wait out the simulated latency.
///
/// Implementations must suspend cooperatively so that dropping the
/// returned future cancels the wait.
#[async_trait]
pub trait LoadDelay: Send + Sync {
    async fn wait(&self, duration: Duration);
}

/// Waits on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl LoadDelay for TokioDelay {
    async fn wait(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

/// Returns immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

#[async_trait]
impl LoadDelay for NoDelay {
    async fn wait(&self, _duration: Duration) {}
}
