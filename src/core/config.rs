//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally through a `.env` file)
//! or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::edfest::{
    ClientResult, Credentials, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, FestivalClient, FileSink,
    Mode,
};

/// Default file receiving the signed URL of every outgoing request.
pub const DEFAULT_DIAGNOSTIC_LOG: &str = "error.log";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Festivals API client configuration.
    pub festival: FestivalConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Configuration for the Edinburgh Festivals API client.
#[derive(Clone, Serialize, Deserialize)]
pub struct FestivalConfig {
    /// API key sent with every request.
    pub api_key: Option<String>,

    /// Shared secret used to sign requests. Never sent or logged.
    pub api_secret: Option<String>,

    /// Whether fringe searches may hit the live dataset.
    pub fringe_mode: Mode,

    /// API endpoint.
    pub base_url: String,

    /// Per-request I/O timeout in seconds.
    pub timeout_secs: u64,

    /// File receiving outgoing request URLs. `None` disables the log.
    pub diagnostic_log: Option<PathBuf>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for FestivalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FestivalConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_secret", &self.api_secret.as_ref().map(|_| "[REDACTED]"))
            .field("fringe_mode", &self.fringe_mode)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("diagnostic_log", &self.diagnostic_log)
            .finish()
    }
}

impl Default for FestivalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            fringe_mode: Mode::Demo,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            diagnostic_log: Some(PathBuf::from(DEFAULT_DIAGNOSTIC_LOG)),
        }
    }
}

impl FestivalConfig {
    /// Build the API client. Fails when the key or secret is missing.
    pub fn build_client(&self) -> ClientResult<FestivalClient> {
        let credentials = Credentials::new(
            self.api_key.clone().unwrap_or_default(),
            self.api_secret.clone().unwrap_or_default(),
        )?;

        let client = FestivalClient::new(credentials, self.fringe_mode)?
            .with_base_url(&self.base_url)?
            .with_timeout(Duration::from_secs(self.timeout_secs))?;

        Ok(match &self.diagnostic_log {
            Some(path) => client.with_sink(Arc::new(FileSink::new(path))),
            None => client,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "edfest-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            festival: FestivalConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Server settings use the `MCP_` prefix (`MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`, `MCP_TRANSPORT`...). The festivals API client reads
    /// `EDFEST_API_KEY`, `EDFEST_API_SECRET`, `EDFEST_FRINGE_MODE`,
    /// `EDFEST_BASE_URL`, `EDFEST_TIMEOUT_SECS` and `EDFEST_DIAGNOSTIC_LOG`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        config.logging.level = Self::log_level_from_env();

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        config.festival = FestivalConfig::from_env();

        config
    }

    /// Read `MCP_LOG_LEVEL` (after loading `.env`), defaulting to `info`.
    ///
    /// Called before the subscriber is installed so that warnings raised
    /// while parsing the rest of the configuration reach the log.
    pub fn log_level_from_env() -> String {
        dotenvy::dotenv().ok();
        std::env::var("MCP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string())
    }
}

/// Parse a fringe mode, falling back to `Demo` on unknown values.
///
/// Returns the warning to report alongside the fallback.
fn fringe_mode_or_demo(raw: &str) -> (Mode, Option<String>) {
    match raw.parse() {
        Ok(mode) => (mode, None),
        Err(e) => (Mode::Demo, Some(format!("{e}; falling back to demo mode"))),
    }
}

impl FestivalConfig {
    fn from_env() -> Self {
        let mut festival = Self::default();

        festival.api_key = std::env::var("EDFEST_API_KEY").ok();
        festival.api_secret = std::env::var("EDFEST_API_SECRET").ok();
        if festival.api_key.is_some() && festival.api_secret.is_some() {
            info!("Festival API credentials loaded from environment");
        } else {
            warn!("EDFEST_API_KEY or EDFEST_API_SECRET not set - festival searches will fail");
        }

        if let Ok(raw) = std::env::var("EDFEST_FRINGE_MODE") {
            let (mode, warning) = fringe_mode_or_demo(&raw);
            if let Some(warning) = warning {
                warn!("{warning}");
            }
            festival.fringe_mode = mode;
        }
        info!("Fringe mode: {}", festival.fringe_mode);

        if let Ok(base_url) = std::env::var("EDFEST_BASE_URL") {
            festival.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("EDFEST_TIMEOUT_SECS") {
            festival.timeout_secs = timeout.parse().unwrap_or_else(|_| {
                warn!("Invalid EDFEST_TIMEOUT_SECS '{timeout}', using {DEFAULT_TIMEOUT_SECS}s");
                DEFAULT_TIMEOUT_SECS
            });
        }

        if let Ok(path) = std::env::var("EDFEST_DIAGNOSTIC_LOG") {
            festival.diagnostic_log = if path.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(path))
            };
        }

        festival
    }
}
