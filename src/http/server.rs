//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the per-process fault state (`AppState`) from config
//! - Create the Axum Router from the route table
//! - Wire up middleware (request tracing)
//! - Bind and serve until a shutdown signal arrives
//!
//! # Design Decisions
//! - No request timeout layer: `/timeout` and `/oom` must outlive any
//!   reasonable deadline
//! - `/crash` exits from inside a handler; graceful shutdown is never reached

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::{HealthMode, ServerConfig};
use crate::faults::{CrashTrigger, DelayResponder, HealthState, SharedGrowth, StatusCodeSource};
use crate::http::request::request_span;
use crate::http::routes::{route_table, RouteTable};
use crate::lifecycle::shutdown_signal;

/// Errors raised while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub health: Arc<HealthState>,
    pub growth: SharedGrowth,
    pub codes: Arc<StatusCodeSource>,
    pub delay: DelayResponder,
    pub crash: CrashTrigger,
    pub growth_interval: Duration,
}

impl AppState {
    /// Construct fresh fault state: healthy, with a one-element buffer.
    ///
    /// `/health` shares the `/oom` buffer only in leak mode; otherwise it
    /// owns an independent one.
    pub fn from_config(config: &ServerConfig) -> Self {
        let growth = SharedGrowth::new();
        let health_growth = match config.mode {
            HealthMode::MemoryLeak => growth.clone(),
            HealthMode::Plain | HealthMode::FlappingHealth => SharedGrowth::new(),
        };
        Self {
            health: Arc::new(HealthState::new(config.mode, health_growth)),
            growth,
            codes: Arc::new(StatusCodeSource::default()),
            delay: DelayResponder::new(config.faults.delay()),
            crash: CrashTrigger::new(config.faults.crash_exit_code),
            growth_interval: config.faults.growth_interval(),
        }
    }
}

/// HTTP server for the fault-injection service.
pub struct HttpServer {
    router: Router,
    summary: String,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Self {
        let state = AppState::from_config(&config);
        let table = route_table();
        let summary = table.summary();
        let router = Self::build_router(table, state);

        Self {
            router,
            summary,
            config,
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(table: RouteTable, state: AppState) -> Router {
        table
            .into_router()
            .with_state(state)
            .layer(TraceLayer::new_for_http().make_span_with(request_span))
    }

    /// Printable list of the served routes.
    pub fn route_summary(&self) -> &str {
        &self.summary
    }

    /// The fully assembled router, for driving requests without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the configured listener address.
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        let address = self.config.listener.bind_address();
        TcpListener::bind(&address)
            .await
            .map_err(|source| ServerError::Bind { address, source })
    }

    /// Run the server until Ctrl+C, SIGTERM or the shutdown broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mode = ?self.config.mode,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {},
                    _ = shutdown.recv() => {
                        tracing::info!("Shutdown requested");
                    },
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
