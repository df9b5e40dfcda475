//! Pause between polling iterations

use std::time::Duration;

use async_trait::async_trait;

/// Decides how long the engine waits before the next poll
#[async_trait]
pub trait Scheduler: Send + Sync + std::fmt::Debug {
    /// Wait until the next poll is due
    async fn tick(&self);
}

/// Waits the same period after every iteration, whatever its outcome
#[derive(Debug, Clone)]
pub struct FixedInterval {
    period: Duration,
}

impl FixedInterval {
    pub fn new(period: Duration) -> Self {
        Self { period }
    }
}

#[async_trait]
impl Scheduler for FixedInterval {
    async fn tick(&self) {
        tracing::debug!("Sleeping {:?} until next poll", self.period);
        tokio::time::sleep(self.period).await;
    }
}
