//! Status code generation.
//!
//! `/code/{n}` echoes the requested code back as the response status.
//! `/code/random` draws from a fixed weighted table using a cumulative-weight
//! lookup and a single uniform draw.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rand::Rng;
use serde::Serialize;

/// Default weights: mostly 200, rarely a failure.
pub const DEFAULT_WEIGHTS: [(u16, u32); 4] = [(200, 1000), (404, 1), (500, 1), (503, 1)];

/// Immutable weighted distribution over status codes.
#[derive(Debug, Clone)]
pub struct StatusCodeSource {
    /// `(code, cumulative upper bound)` in table order.
    cumulative: Vec<(u16, u32)>,
    total: u32,
}

impl StatusCodeSource {
    /// Build a source from `(code, weight)` pairs. Zero weights are skipped.
    pub fn new(weights: &[(u16, u32)]) -> Self {
        let mut total = 0u32;
        let cumulative = weights
            .iter()
            .filter(|(_, weight)| *weight > 0)
            .map(|&(code, weight)| {
                total += weight;
                (code, total)
            })
            .collect();
        Self { cumulative, total }
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u32 {
        self.total
    }

    /// Map a point in `[0, total_weight)` to its code.
    pub fn pick(&self, point: u32) -> Option<u16> {
        self.cumulative
            .iter()
            .find(|(_, bound)| point < *bound)
            .map(|(code, _)| *code)
    }

    /// Draw one code using the given random source.
    pub fn draw<R: Rng>(&self, rng: &mut R) -> Option<u16> {
        if self.total == 0 {
            return None;
        }
        self.pick(rng.gen_range(0..self.total))
    }

    /// Reply with the exact code requested.
    pub fn reply_fixed(code: u64) -> CodeReply {
        CodeReply { code }
    }

    /// Reply with a code drawn from the table.
    pub fn reply_random(&self) -> CodeReply {
        let code = self.draw(&mut rand::thread_rng()).unwrap_or(200);
        tracing::debug!(code, "Random status code drawn");
        CodeReply { code: u64::from(code) }
    }
}

impl Default for StatusCodeSource {
    fn default() -> Self {
        Self::new(&DEFAULT_WEIGHTS)
    }
}

/// Body and status of a `/code` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeReply {
    pub code: u64,
}

impl CodeReply {
    /// The status to send. Codes the HTTP layer cannot carry become 500.
    pub fn status_code(&self) -> StatusCode {
        u16::try_from(self.code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for CodeReply {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if u64::from(status.as_u16()) != self.code {
            tracing::warn!(code = self.code, "Requested code is not a valid HTTP status, sending 500");
        }
        (status, Json(self)).into_response()
    }
}
