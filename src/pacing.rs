// src/pacing.rs
use std::time::Duration;

pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(1000);

/// Cosmetic pause between classifying a successful response and revealing it.
///
/// Only the reveal waits; classification has already happened by the time
/// the pacer runs, so a zero delay changes no outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealPacer {
    delay: Duration,
}

impl Default for RevealPacer {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_DELAY)
    }
}

impl RevealPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Yields to the runtime for the configured delay.
    ///
    /// Awaited inline: a submission is never cancelled, so no timer task is spawned.
    pub async fn pause(&self) {
        if self.delay.is_zero() {
            return;
        }
        tokio::time::sleep(self.delay).await;
    }
}
