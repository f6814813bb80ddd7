//! Slow responder for `/timeout`.

use std::time::Duration;

use axum::Json;
use serde::Serialize;

/// Holds a request for a fixed duration before answering.
#[derive(Debug, Clone, Copy)]
pub struct DelayResponder {
    duration: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Waited {
    pub waited: u64,
}

impl DelayResponder {
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Sleep without blocking the runtime, then report how long we waited.
    ///
    /// If the caller goes away the future is dropped and the wait is abandoned.
    pub async fn respond(&self) -> Json<Waited> {
        let secs = self.duration.as_secs();
        tracing::info!(seconds = secs, "Waiting before answering request");
        tokio::time::sleep(self.duration).await;
        Json(Waited { waited: secs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_waits_full_duration() {
        let responder = DelayResponder::new(Duration::from_secs(120));
        let start = Instant::now();
        let Json(waited) = responder.respond().await;
        assert!(start.elapsed() >= Duration::from_secs(120));
        assert_eq!(waited, Waited { waited: 120 });
    }

    #[tokio::test(start_paused = true)]
    async fn test_does_not_block_other_tasks() {
        let responder = DelayResponder::new(Duration::from_secs(120));
        let slow = tokio::spawn(async move { responder.respond().await });

        let start = Instant::now();
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(start.elapsed() < Duration::from_secs(120));
        assert!(!slow.is_finished());

        let Json(waited) = slow.await.unwrap();
        assert_eq!(waited.waited, 120);
    }
}
