//! Daemon entry point for the apidex MCP server.
//!
//! Loads configuration and the services manifest, builds the initial
//! endpoint index, and serves the MCP protocol over stdio and/or
//! streamable HTTP.

mod config;
mod services;

use std::sync::Arc;

use apidex_core::catalog::ApiCatalog;
use apidex_core::loader::DocumentLoader;
use apidex_mcp::server::{self, McpHttpServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::ApidexConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Logs go to stderr so the stdio transport stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ApidexConfig::from_args()?;
    let descriptors = services::load_services(&config.services_file)?;

    let mut client = reqwest::Client::builder();
    if let Some(timeout) = config.fetch_timeout {
        client = client.timeout(timeout);
    }
    let loader = DocumentLoader::new(client.build()?);

    let catalog = Arc::new(ApiCatalog::new(descriptors, loader));
    let index = catalog.rebuild().await;
    info!(
        services = index.schemas().len(),
        endpoints = index.len(),
        "initial endpoint index built"
    );

    if config.mcp_serve {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr)
            .with_sse_keep_alive(config.sse_keep_alive);
        if config.enable_stdio {
            let http_catalog = Arc::clone(&catalog);
            tokio::spawn(async move {
                if let Err(err) = server::serve_streamable_http(http_catalog, http_config).await {
                    error!(error = %err, "streamable HTTP server exited");
                }
            });
            server::serve_stdio(catalog).await?;
        } else {
            server::serve_streamable_http(catalog, http_config).await?;
        }
    } else {
        server::serve_stdio(catalog).await?;
    }
    Ok(())
}
