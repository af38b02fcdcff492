//! Gateway configuration.

use std::env;

use common::{CacheConfig, ServiceConfig};

/// Default catalog-service gRPC endpoint
const DEFAULT_CATALOG_SERVICE_URL: &str = "http://localhost:50052";

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Catalog service gRPC endpoint
    pub catalog_service_url: String,
    /// Redis connection and category tree TTL
    pub cache: CacheConfig,
    /// HTTP bind address
    pub server: ServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            catalog_service_url: env::var("CATALOG_SERVICE_URL")
                .unwrap_or(defaults.catalog_service_url),
            cache: CacheConfig {
                url: env::var("GATEWAY_REDIS_URL")
                    .or_else(|_| env::var("REDIS_URL"))
                    .unwrap_or(defaults.cache.url),
                default_ttl_seconds: env::var("CATEGORY_CACHE_TTL_SECONDS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(defaults.cache.default_ttl_seconds),
            },
            server: ServiceConfig {
                host: env::var("GATEWAY_HOST").unwrap_or(defaults.server.host),
                port: env::var("GATEWAY_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.server.port),
            },
        }
    }

    /// Extract catalog service port from URL.
    pub fn catalog_port(&self) -> u16 {
        self.catalog_service_url
            .rsplit(':')
            .next()
            .and_then(|p| p.trim_end_matches('/').parse().ok())
            .unwrap_or(50052)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            catalog_service_url: DEFAULT_CATALOG_SERVICE_URL.to_string(),
            cache: CacheConfig::default(),
            server: ServiceConfig::default(),
        }
    }
}
