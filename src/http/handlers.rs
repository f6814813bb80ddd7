//! Endpoint handlers.
//!
//! Each handler is a thin adapter from axum extractors to a fault in
//! `crate::faults`.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode, Uri, Version},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::faults::{
    delay::Waited,
    echo::format_echo,
    CodeReply, HealthReport, StatusCodeSource, TerminalAction,
};
use crate::http::server::AppState;

#[derive(Serialize)]
pub struct Hello {
    pub text: &'static str,
}

#[derive(Serialize)]
pub struct Info {
    pub version: &'static str,
}

pub async fn hello() -> Json<Hello> {
    Json(Hello { text: "Hello, world!" })
}

pub async fn health(State(state): State<AppState>) -> HealthReport {
    state.health.observe()
}

pub async fn echo(method: Method, uri: Uri, version: Version, headers: HeaderMap) -> String {
    format_echo(&method, &uri, version, &headers)
}

pub async fn info() -> Json<Info> {
    Json(Info {
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Streams `size=<N>` lines forever while doubling the shared buffer.
pub async fn oom(State(state): State<AppState>) -> Response {
    tracing::warn!(interval = ?state.growth_interval, "Starting unbounded memory growth");
    let body = Body::from_stream(state.growth.stream(state.growth_interval));
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/plain; charset=utf-8"))],
        body,
    )
        .into_response()
}

pub async fn crash(State(state): State<AppState>) -> TerminalAction {
    state.crash.trigger()
}

pub async fn timeout(State(state): State<AppState>) -> Json<Waited> {
    state.delay.respond().await
}

/// `/code/{code}`: only all-digit segments are served, anything else is a 404.
pub async fn reply_code(Path(code): Path<String>) -> Response {
    match parse_code(&code) {
        Some(code) => StatusCodeSource::reply_fixed(code).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn reply_random(State(state): State<AppState>) -> CodeReply {
    state.codes.reply_random()
}

fn parse_code(segment: &str) -> Option<u64> {
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
