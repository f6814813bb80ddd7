//! Route table.
//!
//! Registers every endpoint together with a one-line description, so the
//! route summary printed by `web_app` always matches what is served.

use axum::{handler::Handler, routing::get, Router};

use crate::http::handlers;
use crate::http::server::AppState;

/// A registered route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Router under construction plus its descriptions.
pub struct RouteTable {
    entries: Vec<RouteEntry>,
    router: Router<AppState>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            router: Router::new(),
        }
    }

    /// Register a GET route.
    pub fn get<H, T>(mut self, path: &'static str, description: &'static str, handler: H) -> Self
    where
        H: Handler<T, AppState>,
        T: 'static,
    {
        self.router = self.router.route(path, get(handler));
        self.entries.push(RouteEntry {
            method: "GET",
            path,
            description,
        });
        self
    }

    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// One line per route: `GET on /health              : description`.
    pub fn summary(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{} on {:<20}: {}", entry.method, entry.path, entry.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn into_router(self) -> Router<AppState> {
        self.router
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Every endpoint the service exposes.
pub fn route_table() -> RouteTable {
    RouteTable::new()
        .get("/", "Hello world JSON", handlers::hello)
        .get("/health", "Health of the application", handlers::health)
        .get("/echo", "Echo request line and headers", handlers::echo)
        .get("/info", "Version information", handlers::info)
        .get("/oom", "Grow memory forever, streaming the size", handlers::oom)
        .get("/crash", "Exit the process without answering", handlers::crash)
        .get("/timeout", "Answer only after a long wait", handlers::timeout)
        .get("/code/{code}", "Reply with the requested status code", handlers::reply_code)
        .get("/code/random", "Reply with a weighted random status code", handlers::reply_random)
}
