//! Configuration schema definitions.
//!
//! All types derive Serde traits so a TOML file can override the defaults.
//! The health mode and port always come from the command line.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::faults::crash::DEFAULT_EXIT_CODE;

/// Root configuration for the server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Which `/health` wiring to construct.
    pub mode: HealthMode,

    /// Fault tunables.
    pub faults: FaultConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// `/health` behaviour selected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthMode {
    /// Always healthy.
    #[default]
    Plain,
    /// Flips between healthy and unhealthy on every call.
    FlappingHealth,
    /// Doubles the growth buffer on every call.
    MemoryLeak,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind: an IP literal or a resolvable hostname (e.g., "0.0.0.0", "localhost").
    pub host: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Fault tunables.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FaultConfig {
    /// How long `/timeout` holds a request, in seconds.
    pub delay_secs: u64,

    /// Pause between `/oom` growth steps, in milliseconds.
    pub growth_interval_ms: u64,

    /// Exit code used by `/crash`.
    pub crash_exit_code: u8,
}

impl FaultConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    pub fn growth_interval(&self) -> Duration {
        Duration::from_millis(self.growth_interval_ms)
    }
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            delay_secs: 120,
            growth_interval_ms: 100,
            crash_exit_code: DEFAULT_EXIT_CODE,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.listener.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.mode, HealthMode::Plain);
        assert_eq!(config.faults.delay(), Duration::from_secs(120));
        assert_eq!(config.faults.growth_interval(), Duration::from_millis(100));
        assert_eq!(config.faults.crash_exit_code, 255);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            mode = "flapping_health"

            [faults]
            delay_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, HealthMode::FlappingHealth);
        assert_eq!(config.faults.delay_secs, 5);
        assert_eq!(config.faults.growth_interval_ms, 100);
        assert_eq!(config.listener.port, 8080);
    }
}
