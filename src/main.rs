//! chaos-backend
//!
//! A deliberately unreliable HTTP service built with Tokio and Axum, used to
//! check how schedulers, health-check probes and load balancers cope with a
//! misbehaving backend.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────┐
//!   CLI subcommand    │                chaos-backend                  │
//!   ──────────────────┼─▶ cli ──┬─▶ fail_after ─▶ countdown ─▶ exit   │
//!                     │         │                                     │
//!                     │         └─▶ config ─▶ HttpServer              │
//!                     │                        │                      │
//!   Client Request    │                        ▼                      │
//!   ──────────────────┼─────────────────▶ routes ─▶ handlers          │
//!                     │                                 │             │
//!                     │      ┌──────────────────────────┘             │
//!                     │      ▼                                        │
//!   Client Response   │   faults: health · growth · status · echo     │
//!   ◀─────────────────┼──         delay · crash (process exit)        │
//!                     └──────────────────────────────────────────────┘
//! ```

use clap::Parser;

use chaos_backend::cli::{Cli, Mode};
use chaos_backend::faults::countdown;
use chaos_backend::lifecycle::Shutdown;
use chaos_backend::observability::init_logging;
use chaos_backend::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mode = Cli::parse().into_mode()?;

    match mode {
        Mode::FailAfter(config) => {
            init_logging("info");
            let action = tokio::task::spawn_blocking(move || {
                countdown(config, &mut std::io::stdout(), std::thread::sleep)
            })
            .await?;
            action.execute()
        }
        Mode::Serve { config, show_routes } => {
            init_logging(&config.observability.log_level);

            tracing::info!("chaos-backend v{} starting", env!("CARGO_PKG_VERSION"));
            tracing::info!(
                bind_address = %config.listener.bind_address(),
                mode = ?config.mode,
                delay_secs = config.faults.delay_secs,
                growth_interval_ms = config.faults.growth_interval_ms,
                "Configuration loaded"
            );

            let server = HttpServer::new(config);
            if show_routes {
                println!("{}", server.route_summary());
            }

            let listener = server.bind().await?;
            let shutdown = Shutdown::new();
            server.run(listener, shutdown.subscribe()).await?;

            tracing::info!("Shutdown complete");
            Ok(())
        }
    }
}
