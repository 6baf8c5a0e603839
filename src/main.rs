//! Edinburgh Festivals MCP Server entry point.
//!
//! Initializes logging, loads configuration, and serves the festival search
//! tools over the configured transport.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use edfest_mcp_server::core::{self, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Must precede Config::from_env, which logs warnings.
    init_logging(&Config::log_level_from_env());

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);

    core::run(config)
        .await
        .context("Edinburgh festivals MCP server stopped")?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
