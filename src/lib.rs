//! Deliberately unreliable HTTP service for exercising orchestrators,
//! health-check probes and load balancers.

pub mod cli;
pub mod config;
pub mod faults;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
