//! Configuration loading

use anyhow::{Context, Result};
use caffeine_proxy::CaffeineClientConfig;
use ::config::{Config as ConfigBuilder, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::Path;
use std::time::Duration;

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "CAFFEINE_BROKER";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub backend: BackendConfig,
    #[serde(default)]
    pub http_client: HttpClientConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

/// Backend cache-management API endpoint and credentials
#[derive(Clone, Deserialize)]
pub struct BackendConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpClientConfig {
    /// Skip TLS certificate verification
    #[serde(default)]
    pub skip_tls_verify: bool,
    /// Per-request timeout; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

/// Metrics configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_enabled")]
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: default_metrics_enabled(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_metrics_enabled() -> bool {
    true
}

impl Config {
    /// Load configuration from an optional file, overridden by the environment
    pub fn load(path: &str) -> Result<Self> {
        Self::load_from(
            path,
            Environment::with_prefix(ENV_PREFIX).separator("__"),
        )
    }

    fn load_from(path: &str, environment: Environment) -> Result<Self> {
        ConfigBuilder::builder()
            .add_source(File::from(Path::new(path)).required(false))
            .add_source(environment)
            .build()
            .with_context(|| format!("Failed to read configuration: {}", path))?
            .try_deserialize()
            .with_context(|| format!("Invalid configuration: {}", path))
    }

    /// Settings for the shared backend client
    pub fn client_config(&self) -> CaffeineClientConfig {
        CaffeineClientConfig {
            url: self.backend.uri.clone(),
            username: self.backend.username.clone(),
            password: self.backend.password.clone(),
            skip_tls_verify: self.http_client.skip_tls_verify,
            timeout: self.http_client.timeout_secs.map(Duration::from_secs),
        }
    }
}
