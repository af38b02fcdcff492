//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::product_handler::{CreateProductRequest, ProductListResponse};
use domain::{Category, CategoryNode, Media, ProductDetails, RefundPolicy};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::category_handler::list_categories,
        crate::handlers::product_handler::list_products,
        crate::handlers::product_handler::create_product,
    ),
    components(
        schemas(
            Category,
            CategoryNode,
            Media,
            RefundPolicy,
            ProductDetails,
            ProductListResponse,
            CreateProductRequest,
        )
    ),
    tags(
        (name = "Categories", description = "Category navigation"),
        (name = "Products", description = "Product browsing and creation"),
    )
)]
pub struct ApiDoc;
