//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, graceful shutdown)
//!     → request.rs (per-request span with UUID)
//!     → routes.rs (path → handler, with descriptions)
//!     → handlers.rs (extractors → crate::faults)
//!     → response (JSON, text, endless stream, or process exit)
//! ```

pub mod handlers;
pub mod request;
pub mod routes;
pub mod server;

pub use routes::{route_table, RouteEntry, RouteTable};
pub use server::{AppState, HttpServer, ServerError};
