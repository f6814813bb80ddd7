//! Health-check state machine.
//!
//! # States
//! - Healthy: `/health` answers 200 `{"status": "ok"}`
//! - Unhealthy: `/health` answers 500 `{"status": "failure"}`
//!
//! # State Transitions
//! ```text
//! toggle disabled: Healthy forever
//! toggle enabled:  Healthy → Unhealthy → Healthy → ... on every observation
//! ```
//!
//! In leak mode every observation also doubles the growth buffer, which is
//! then the one `/oom` grows. In the other modes the buffer is private and
//! stays at one element.

use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::config::HealthMode;
use crate::faults::growth::SharedGrowth;

/// Flip-flop health flag with optional memory leak.
#[derive(Debug)]
pub struct HealthState {
    healthy: AtomicBool,
    toggle_enabled: bool,
    leak_enabled: bool,
    growth: SharedGrowth,
}

impl HealthState {
    /// Create a healthy state wired for the given mode.
    pub fn new(mode: HealthMode, growth: SharedGrowth) -> Self {
        Self {
            healthy: AtomicBool::new(true),
            toggle_enabled: mode == HealthMode::FlappingHealth,
            leak_enabled: mode == HealthMode::MemoryLeak,
            growth,
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }

    pub fn toggle_enabled(&self) -> bool {
        self.toggle_enabled
    }

    /// Record one health-check invocation and report the resulting state.
    pub fn observe(&self) -> HealthReport {
        if self.leak_enabled {
            self.growth.grow();
        }

        let healthy = if self.toggle_enabled {
            // fetch_xor returns the previous value
            let healthy = !self.healthy.fetch_xor(true, Ordering::SeqCst);
            tracing::info!(healthy, "Health flipped");
            healthy
        } else {
            self.is_healthy()
        };

        HealthReport {
            status: if healthy { HealthStatus::Ok } else { HealthStatus::Failure },
            size: self.growth.len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Failure,
}

/// Body of a `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub size: usize,
}

impl HealthReport {
    pub fn status_code(&self) -> StatusCode {
        match self.status {
            HealthStatus::Ok => StatusCode::OK,
            HealthStatus::Failure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HealthReport {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_mode_is_always_healthy() {
        let state = HealthState::new(HealthMode::Plain, SharedGrowth::new());
        for _ in 0..10 {
            let report = state.observe();
            assert_eq!(report.status, HealthStatus::Ok);
            assert_eq!(report.status_code(), StatusCode::OK);
            assert_eq!(report.size, 1);
        }
        assert!(state.is_healthy());
    }

    #[test]
    fn test_flapping_alternates_starting_with_failure() {
        let state = HealthState::new(HealthMode::FlappingHealth, SharedGrowth::new());
        assert!(state.toggle_enabled());

        let statuses: Vec<_> = (0..6).map(|_| state.observe().status).collect();
        assert_eq!(
            statuses,
            vec![
                HealthStatus::Failure,
                HealthStatus::Ok,
                HealthStatus::Failure,
                HealthStatus::Ok,
                HealthStatus::Failure,
                HealthStatus::Ok,
            ]
        );
    }

    #[test]
    fn test_flapping_parity() {
        for n in 0..9 {
            let state = HealthState::new(HealthMode::FlappingHealth, SharedGrowth::new());
            for _ in 0..n {
                state.observe();
            }
            assert_eq!(state.is_healthy(), n % 2 == 0, "after {} calls", n);
        }
    }

    #[test]
    fn test_leak_mode_doubles_on_each_call() {
        let growth = SharedGrowth::new();
        let state = HealthState::new(HealthMode::MemoryLeak, growth.clone());

        let sizes: Vec<_> = (0..5).map(|_| state.observe().size).collect();
        assert_eq!(sizes, vec![2, 4, 8, 16, 32]);
        assert_eq!(growth.len(), 32);
        assert!(state.is_healthy());
    }

    #[test]
    fn test_plain_mode_never_grows_its_buffer() {
        let growth = SharedGrowth::new();
        let state = HealthState::new(HealthMode::Plain, growth.clone());
        for _ in 0..5 {
            assert_eq!(state.observe().size, 1);
        }
        assert_eq!(growth.len(), 1);
    }

    #[test]
    fn test_report_serializes_lowercase() {
        let report = HealthReport { status: HealthStatus::Failure, size: 8 };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json, serde_json::json!({"status": "failure", "size": 8}));
    }
}
