use std::time::Duration;

use crate::env_parse_or;

/// HTTP listener settings.
///
/// # Environment Variables
///
/// - `PORT`: Listen port (default: `8080`)
/// - `SHUTDOWN_GRACE_SECS`: How long in-flight requests may run after shutdown begins (default: `15`)
/// - `METRICS_PORT`: Prometheus exporter port (default: `9090`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub shutdown_grace: Duration,
    pub metrics_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            shutdown_grace: Duration::from_secs(15),
            metrics_port: 9090,
        }
    }
}

impl ServerConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: env_parse_or("PORT", defaults.port),
            shutdown_grace: Duration::from_secs(env_parse_or(
                "SHUTDOWN_GRACE_SECS",
                defaults.shutdown_grace.as_secs(),
            )),
            metrics_port: env_parse_or("METRICS_PORT", defaults.metrics_port),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
