//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Fault handlers and the HTTP layer produce:
//!     → logging.rs (structured log events to stdout)
//!     → TraceLayer spans with a per-request UUID (http/server.rs)
//! ```

pub mod logging;

pub use logging::init_logging;
