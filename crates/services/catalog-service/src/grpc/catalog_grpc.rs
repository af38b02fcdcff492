//! gRPC implementation for CatalogService.

use std::sync::Arc;

use tonic::{Request, Response, Status};
use uuid::Uuid;

use crate::service::CatalogService;
use domain::{Category, CategoryNode, CreateProduct, ProductDetails, RefundPolicy};
use proto::catalog::{
    catalog_service_server::CatalogService as CatalogServiceProto,
    Category as CategoryProto, CategoryNode as CategoryNodeProto, CreateProductRequest,
    GetManyProductsRequest, ListCategoriesRequest, ListCategoriesResponse, ListProductsResponse,
    Media as MediaProto, ProductResponse,
};

/// gRPC service wrapper for CatalogService.
pub struct CatalogGrpcService {
    service: Arc<dyn CatalogService>,
}

impl CatalogGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn CatalogService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl CatalogServiceProto for CatalogGrpcService {
    async fn list_categories(
        &self,
        _request: Request<ListCategoriesRequest>,
    ) -> Result<Response<ListCategoriesResponse>, Status> {
        let nodes = self.service.list_categories().await.map_err(Status::from)?;
        let categories = nodes.iter().map(node_to_proto).collect();

        Ok(Response::new(ListCategoriesResponse { categories }))
    }

    async fn get_many_products(
        &self,
        request: Request<GetManyProductsRequest>,
    ) -> Result<Response<ListProductsResponse>, Status> {
        let req = request.into_inner();

        let products = self
            .service
            .get_many_products(req.category.as_deref())
            .await
            .map_err(Status::from)?;
        let total = products.len() as i32;
        let products = products.iter().map(product_to_proto).collect();

        Ok(Response::new(ListProductsResponse { products, total }))
    }

    async fn create_product(
        &self,
        request: Request<CreateProductRequest>,
    ) -> Result<Response<ProductResponse>, Status> {
        let req = request.into_inner();
        let input = CreateProduct {
            name: req.name,
            description: req.description,
            price: req.price,
            category_id: parse_uuid(&req.category_id)?,
            image_id: req.image_id.as_deref().map(parse_uuid).transpose()?,
            refund_policy: parse_refund_policy(req.refund_policy.as_deref())?,
        };

        let product = self
            .service
            .create_product(input)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(product_to_proto(&product)))
    }
}

/// Parse UUID from string.
fn parse_uuid(s: &str) -> Result<Uuid, Status> {
    Uuid::parse_str(s).map_err(|_| Status::invalid_argument("Invalid UUID format"))
}

/// Parse an optional refund policy, defaulting when absent.
fn parse_refund_policy(value: Option<&str>) -> Result<RefundPolicy, Status> {
    match value {
        Some(value) => value
            .parse()
            .map_err(|e: domain::DomainError| Status::invalid_argument(e.to_string())),
        None => Ok(RefundPolicy::default()),
    }
}

/// Convert domain Category to proto Category.
fn category_to_proto(category: &Category) -> CategoryProto {
    CategoryProto {
        id: category.id.to_string(),
        name: category.name.clone(),
        slug: category.slug.clone(),
        color: category.color.clone(),
        parent_id: category.parent_id.map(|id| id.to_string()),
        created_at: category.created_at.to_rfc3339(),
        updated_at: category.updated_at.to_rfc3339(),
    }
}

/// Convert domain CategoryNode to proto CategoryNode.
fn node_to_proto(node: &CategoryNode) -> CategoryNodeProto {
    CategoryNodeProto {
        id: node.id.to_string(),
        name: node.name.clone(),
        slug: node.slug.clone(),
        color: node.color.clone(),
        subcategories: node.subcategories.iter().map(category_to_proto).collect(),
    }
}

/// Convert expanded product to proto ProductResponse.
fn product_to_proto(product: &ProductDetails) -> ProductResponse {
    ProductResponse {
        id: product.id.to_string(),
        name: product.name.clone(),
        description: product.description.clone(),
        price: product.price,
        category: Some(category_to_proto(&product.category)),
        image: product.image.as_ref().map(|image| MediaProto {
            id: image.id.to_string(),
            alt: image.alt.clone(),
            url: image.url.clone(),
        }),
        refund_policy: product.refund_policy.to_string(),
        created_at: product.created_at.to_rfc3339(),
        updated_at: product.updated_at.to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_refund_policy_defaults() {
        assert_eq!(parse_refund_policy(None).unwrap(), RefundPolicy::ThirtyDays);
        assert_eq!(
            parse_refund_policy(Some("no-refunds")).unwrap(),
            RefundPolicy::NoRefunds
        );
    }

    #[test]
    fn test_unknown_refund_policy_is_invalid_argument() {
        let status = parse_refund_policy(Some("forever")).unwrap_err();
        assert_eq!(status.code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn test_parse_uuid_rejects_garbage() {
        assert!(parse_uuid("not-a-uuid").is_err());
        assert!(parse_uuid(&Uuid::new_v4().to_string()).is_ok());
    }
}
