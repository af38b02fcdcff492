//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;

use common::AppResult;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub services: ServiceStatus,
}

/// Dependency health.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    pub redis: ServiceHealth,
    pub catalog: ServiceHealth,
}

/// Service health with optional error message.
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceHealth {
    fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

impl<T> From<AppResult<T>> for ServiceHealth {
    fn from(result: AppResult<T>) -> Self {
        match result {
            Ok(_) => Self {
                status: "healthy",
                error: None,
            },
            Err(e) => Self {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        }
    }
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Health check endpoint - verifies Redis and catalog-service reachability.
pub async fn health_check(State(state): State<AppState>) -> Response {
    let (redis, catalog) = tokio::join!(
        state.cache.ping(),
        state.catalog_client.list_categories()
    );

    let services = ServiceStatus {
        redis: redis.into(),
        catalog: catalog.into(),
    };
    let all_healthy = services.redis.is_healthy() && services.catalog.is_healthy();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" },
        services,
    };

    if all_healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::AppError;

    #[test]
    fn test_service_health_from_result() {
        let healthy = ServiceHealth::from(Ok::<_, AppError>(()));
        assert!(healthy.is_healthy());
        assert_eq!(healthy.status, "healthy");

        let unhealthy = ServiceHealth::from(Err::<(), _>(AppError::service_unavailable("catalog")));
        assert!(!unhealthy.is_healthy());
        assert_eq!(unhealthy.status, "unhealthy");
    }
}
