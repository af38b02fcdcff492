//! Application state for dependency injection.

use std::sync::Arc;

use crate::clients::CatalogClient;
use crate::config::GatewayConfig;
use crate::middleware::Cache;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog_client: Arc<CatalogClient>,
    pub cache: Arc<Cache>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Create new app state.
    pub fn new(catalog_client: Arc<CatalogClient>, cache: Arc<Cache>, config: GatewayConfig) -> Self {
        Self {
            catalog_client,
            cache,
            config: Arc::new(config),
        }
    }
}
