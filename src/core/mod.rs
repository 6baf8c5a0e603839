//! Core infrastructure: configuration, errors, the MCP server handler and
//! the transports it is served over.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};

use tracing::info;

/// Build the server from `config` and serve it until the transport stops.
///
/// Fails before any transport starts when the festivals API client cannot
/// be configured.
pub async fn run(config: Config) -> Result<()> {
    let transport = TransportService::new(config.transport.clone());
    let server = McpServer::new(config)?;

    info!(
        "Server initialized (fringe mode: {}, endpoint: {})",
        server.client().mode(),
        server.client().base_url()
    );

    transport.run(server).await?;
    Ok(())
}
