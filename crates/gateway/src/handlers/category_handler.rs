//! Category handlers.

use axum::{extract::State, response::Json, routing::get, Router};
use tracing::{debug, warn};

use common::AppResult;
use domain::CategoryNode;

use crate::state::AppState;

/// Create category routes
pub fn category_routes() -> Router<AppState> {
    Router::new().route("/", get(list_categories))
}

/// List top-level categories with their subcategories
///
/// Served from Redis when cached. A cache outage falls back to the catalog
/// service.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Category tree sorted by name", body = Vec<CategoryNode>),
        (status = 503, description = "Catalog service unavailable")
    )
)]
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryNode>>> {
    match state.cache.get_category_tree().await {
        Ok(Some(tree)) => {
            debug!("Category tree served from cache");
            return Ok(Json(tree));
        }
        Ok(None) => {}
        Err(e) => warn!("Category cache read failed: {}", e),
    }

    let tree = state.catalog_client.list_categories().await?;

    if let Err(e) = state.cache.set_category_tree(&tree).await {
        warn!("Category cache write failed: {}", e);
    }

    Ok(Json(tree))
}
