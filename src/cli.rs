//! Command-line interface.
//!
//! Each subcommand picks one process mode: a standalone countdown
//! (`fail_after`) or the HTTP server with a particular `/health` wiring.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::{load_config, validate_config, ConfigError, HealthMode, ServerConfig};
use crate::faults::crash::DEFAULT_EXIT_CODE;
use crate::faults::DelayedExitConfig;

/// Environment variable consulted when `--port` is not given.
pub const PORT_ENV: &str = "NOMAD_PORT_http";

#[derive(Debug, Parser)]
#[command(name = "chaos-backend", version)]
#[command(about = "A deliberately unreliable HTTP service for resilience testing", long_about = None)]
pub struct Cli {
    /// Optional TOML file with listener and fault settings.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Count down, then exit with the given code (no server)
    #[command(name = "fail_after")]
    FailAfter {
        #[arg(short, long, default_value_t = 10)]
        duration: u32,

        #[arg(short, long, default_value_t = DEFAULT_EXIT_CODE)]
        exit_code: u8,
    },
    /// Serve with /health alternating between 200 and 500
    #[command(name = "flapping_health")]
    FlappingHealth(PortArgs),
    /// Serve with every /health call doubling leaked memory
    #[command(name = "mem_leak")]
    MemLeak(PortArgs),
    /// Serve with a stable /health and print the routes
    #[command(name = "web_app")]
    WebApp(PortArgs),
}

#[derive(Debug, Clone, Copy, Args)]
pub struct PortArgs {
    /// Port to listen on.
    #[arg(short, long, env = PORT_ENV, default_value_t = 8080)]
    pub port: u16,
}

/// What the process should do, after config resolution.
#[derive(Debug, Clone)]
pub enum Mode {
    Serve {
        config: ServerConfig,
        show_routes: bool,
    },
    FailAfter(DelayedExitConfig),
}

impl Cli {
    /// Resolve the parsed arguments (and config file, if any) into a mode.
    pub fn into_mode(self) -> Result<Mode, ConfigError> {
        let (mode, port, show_routes) = match self.command {
            Command::FailAfter { duration, exit_code } => {
                return Ok(Mode::FailAfter(DelayedExitConfig {
                    duration_seconds: duration,
                    exit_code,
                }));
            }
            Command::FlappingHealth(args) => (HealthMode::FlappingHealth, args.port, false),
            Command::MemLeak(args) => (HealthMode::MemoryLeak, args.port, false),
            Command::WebApp(args) => (HealthMode::Plain, args.port, true),
        };

        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ServerConfig::default(),
        };
        config.mode = mode;
        config.listener.port = port;
        validate_config(&config).map_err(ConfigError::Validation)?;

        Ok(Mode::Serve { config, show_routes })
    }
}
