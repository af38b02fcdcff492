//! Product handlers.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use common::AppResult;
use domain::{CreateProduct, ProductDetails, RefundPolicy};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Product listing filter
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Category slug; products of its subcategories are included
    #[param(example = "music")]
    pub category: Option<String>,
}

/// Product listing response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductDetails>,
    pub total: usize,
}

/// Product creation request with validation
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be between 1 and 120 characters"))]
    #[schema(example = "Portrait Lighting Guide")]
    pub name: String,
    #[schema(example = "Twelve studio setups with diagrams")]
    pub description: Option<String>,
    /// Price in USD
    #[validate(range(min = 0.0, message = "Price must be a non-negative number"))]
    #[schema(example = 24.99)]
    pub price: f64,
    pub category_id: Uuid,
    pub image_id: Option<Uuid>,
    /// One of no-refunds, 1-day, 3-day, 7-day, 14-day, 30-day (default)
    #[schema(example = "30-day")]
    pub refund_policy: Option<String>,
}

impl CreateProductRequest {
    /// Convert to the domain input, resolving the refund policy.
    pub fn into_domain(self) -> AppResult<CreateProduct> {
        let refund_policy = match self.refund_policy.as_deref() {
            Some(value) => value.parse::<RefundPolicy>()?,
            None => RefundPolicy::default(),
        };

        Ok(CreateProduct {
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            category_id: self.category_id,
            image_id: self.image_id,
            refund_policy,
        })
    }
}

/// Create product routes
pub fn product_routes() -> Router<AppState> {
    Router::new().route("/", get(list_products).post(create_product))
}

/// List products, optionally filtered by category
#[utoipa::path(
    get,
    path = "/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Products, newest first", body = ProductListResponse),
        (status = 404, description = "Category not found")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ProductListResponse>> {
    let category = query.category.filter(|slug| !slug.is_empty());
    let products = state.catalog_client.get_many_products(category).await?;

    Ok(Json(ProductListResponse {
        total: products.len(),
        products,
    }))
}

/// Create a product
#[utoipa::path(
    post,
    path = "/products",
    tag = "Products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductDetails),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductDetails>)> {
    let input = payload.into_domain()?;
    let product = state.catalog_client.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}
