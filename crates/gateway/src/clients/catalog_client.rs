//! gRPC client for catalog-service.

use chrono::{DateTime, Utc};
use tonic::transport::Channel;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Category, CategoryNode, CreateProduct, Media, ProductDetails, RefundPolicy};
use proto::catalog::{
    catalog_service_client::CatalogServiceClient as ProtoCatalogServiceClient,
    CreateProductRequest, GetManyProductsRequest, ListCategoriesRequest,
};

/// gRPC client wrapper for catalog-service.
pub struct CatalogClient {
    client: ProtoCatalogServiceClient<Channel>,
}

impl CatalogClient {
    /// Connect to catalog-service.
    pub async fn connect(endpoint: &str) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to catalog-service at {}", endpoint);
        let client = ProtoCatalogServiceClient::connect(endpoint.to_string()).await?;
        Ok(Self { client })
    }

    /// Top-level categories with their subcategories.
    pub async fn list_categories(&self) -> AppResult<Vec<CategoryNode>> {
        let request = tonic::Request::new(ListCategoriesRequest {});

        let mut client = self.client.clone();
        let response = client
            .list_categories(request)
            .await
            .map_err(AppError::from)?;

        response
            .into_inner()
            .categories
            .into_iter()
            .map(proto_to_node)
            .collect()
    }

    /// Products of a category and its subcategories, or all products.
    pub async fn get_many_products(&self, category: Option<String>) -> AppResult<Vec<ProductDetails>> {
        let request = tonic::Request::new(GetManyProductsRequest { category });

        let mut client = self.client.clone();
        let response = client
            .get_many_products(request)
            .await
            .map_err(AppError::from)?;

        response
            .into_inner()
            .products
            .into_iter()
            .map(proto_to_product)
            .collect()
    }

    /// Create a product.
    pub async fn create_product(&self, input: CreateProduct) -> AppResult<ProductDetails> {
        let request = tonic::Request::new(CreateProductRequest {
            name: input.name,
            description: input.description,
            price: input.price,
            category_id: input.category_id.to_string(),
            image_id: input.image_id.map(|id| id.to_string()),
            refund_policy: Some(input.refund_policy.to_string()),
        });

        let mut client = self.client.clone();
        let response = client
            .create_product(request)
            .await
            .map_err(AppError::from)?;
        proto_to_product(response.into_inner())
    }
}

fn parse_id(value: &str, field: &str) -> AppResult<Uuid> {
    value
        .parse()
        .map_err(|_| AppError::internal(format!("Invalid {} from catalog-service", field)))
}

fn parse_timestamp(value: &str, field: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AppError::internal(format!("Invalid {} from catalog-service", field)))
}

/// Convert proto Category to domain Category.
fn proto_to_category(proto: proto::catalog::Category) -> AppResult<Category> {
    Ok(Category {
        id: parse_id(&proto.id, "category id")?,
        name: proto.name,
        slug: proto.slug,
        color: proto.color,
        parent_id: proto
            .parent_id
            .as_deref()
            .map(|id| parse_id(id, "parent id"))
            .transpose()?,
        created_at: parse_timestamp(&proto.created_at, "created_at")?,
        updated_at: parse_timestamp(&proto.updated_at, "updated_at")?,
    })
}

/// Convert proto CategoryNode to domain CategoryNode.
fn proto_to_node(proto: proto::catalog::CategoryNode) -> AppResult<CategoryNode> {
    Ok(CategoryNode {
        id: parse_id(&proto.id, "category id")?,
        name: proto.name,
        slug: proto.slug,
        color: proto.color,
        subcategories: proto
            .subcategories
            .into_iter()
            .map(proto_to_category)
            .collect::<AppResult<_>>()?,
    })
}

/// Convert proto ProductResponse to domain ProductDetails.
fn proto_to_product(proto: proto::catalog::ProductResponse) -> AppResult<ProductDetails> {
    let category = proto
        .category
        .ok_or_else(|| AppError::internal("Product without category from catalog-service"))?;

    let image = proto
        .image
        .map(|media| -> AppResult<Media> {
            Ok(Media {
                id: parse_id(&media.id, "media id")?,
                alt: media.alt,
                url: media.url,
            })
        })
        .transpose()?;

    let refund_policy: RefundPolicy = proto
        .refund_policy
        .parse()
        .map_err(|_| AppError::internal("Invalid refund policy from catalog-service"))?;

    Ok(ProductDetails {
        id: parse_id(&proto.id, "product id")?,
        name: proto.name,
        description: proto.description,
        price: proto.price,
        category: proto_to_category(category)?,
        image,
        refund_policy,
        created_at: parse_timestamp(&proto.created_at, "created_at")?,
        updated_at: parse_timestamp(&proto.updated_at, "updated_at")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proto::catalog::{Category as CategoryProto, ProductResponse};

    fn category_proto(slug: &str, parent_id: Option<String>) -> CategoryProto {
        CategoryProto {
            id: Uuid::new_v4().to_string(),
            name: slug.to_uppercase(),
            slug: slug.to_string(),
            color: None,
            parent_id,
            created_at: "2024-03-01T10:00:00+00:00".to_string(),
            updated_at: "2024-03-01T10:00:00+00:00".to_string(),
        }
    }

    fn product_proto(category: Option<CategoryProto>) -> ProductResponse {
        ProductResponse {
            id: Uuid::new_v4().to_string(),
            name: "Film Presets".to_string(),
            description: None,
            price: 19.0,
            category,
            image: None,
            refund_policy: "14-day".to_string(),
            created_at: "2024-03-02T08:30:00+00:00".to_string(),
            updated_at: "2024-03-02T08:30:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_product_conversion() {
        let parent = Uuid::new_v4().to_string();
        let product = proto_to_product(product_proto(Some(category_proto(
            "film",
            Some(parent.clone()),
        ))))
        .unwrap();

        assert_eq!(product.category.slug, "film");
        assert_eq!(product.category.parent_id.unwrap().to_string(), parent);
        assert_eq!(product.refund_policy, RefundPolicy::FourteenDays);
        assert!(product.image.is_none());
    }

    #[test]
    fn test_product_without_category_is_rejected() {
        assert!(proto_to_product(product_proto(None)).is_err());
    }

    #[test]
    fn test_bad_timestamp_is_rejected() {
        let mut category = category_proto("film", None);
        category.created_at = "yesterday".to_string();
        assert!(proto_to_category(category).is_err());
    }
}
