//! API Gateway Library
//!
//! This crate provides the storefront HTTP API and translates requests to
//! catalog-service gRPC calls. The category tree is cached in Redis.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::clients::CatalogClient;
use crate::config::GatewayConfig;
use crate::middleware::Cache;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(
    host: &str,
    port: u16,
    catalog_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.catalog_service_url = format!("http://{}:{}", loopback(host), catalog_port);
    config.server.host = host.to_string();
    config.server.port = port;

    run_server_with_config(config).await
}

/// Run the gateway against the catalog service named in the environment.
pub async fn run_standalone(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.server.host = host.to_string();
    config.server.port = port;

    run_server_with_config(config).await
}

/// Wildcard bind addresses are not dialable; use loopback instead.
fn loopback(host: &str) -> &str {
    match host {
        "0.0.0.0" | "::" => "127.0.0.1",
        other => other,
    }
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Create gRPC client
    let catalog_client = Arc::new(CatalogClient::connect(&config.catalog_service_url).await?);

    // Create cache
    let cache = Arc::new(Cache::connect(&config.cache).await?);

    // Build address
    let addr: SocketAddr = config.server.bind_addr().parse()?;

    // Build router
    let app = create_router(AppState::new(catalog_client, cache, config));

    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_host_dials_loopback() {
        assert_eq!(loopback("0.0.0.0"), "127.0.0.1");
        assert_eq!(loopback("catalog.internal"), "catalog.internal");
    }
}
