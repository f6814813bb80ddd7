//! Request tracing.
//!
//! # Responsibilities
//! - Give every request a UUID v4 id for log correlation
//! - Open a span carrying method, path and the id
//!
//! # Design Decisions
//! - The id lives only in the span; request headers are left untouched so
//!   `/echo` reflects exactly what the client sent

use axum::{body::Body, http::Request};
use tracing::Span;
use uuid::Uuid;

/// Span factory for `TraceLayer::make_span_with`.
pub fn request_span(request: &Request<Body>) -> Span {
    tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    )
}
