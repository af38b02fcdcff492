//! Product repository implementation.
//!
//! Reads expand the category and image relationships one level deep.

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use super::entities::category::{self, Entity as CategoryEntity};
use super::entities::media::{self, Entity as MediaEntity};
use super::entities::product::{self, ActiveModel, Entity as ProductEntity};
use common::{AppError, AppResult};
use domain::{Category, CreateProduct, Media, Product, ProductDetails};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Product repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// List products, newest first. `Some` restricts to products whose
    /// category slug is in the given set.
    async fn find_many(&self, category_slugs: Option<Vec<String>>)
        -> AppResult<Vec<ProductDetails>>;

    /// Find product by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductDetails>>;

    /// Find uploaded media by ID
    async fn find_media(&self, id: Uuid) -> AppResult<Option<Media>>;

    /// Create a new product
    async fn create(&self, input: CreateProduct) -> AppResult<Product>;
}

/// Concrete implementation of ProductRepository
pub struct ProductStore {
    db: DatabaseConnection,
}

impl ProductStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach category and image to each product row.
    async fn expand(
        &self,
        rows: Vec<(product::Model, Option<category::Model>)>,
    ) -> AppResult<Vec<ProductDetails>> {
        let image_ids: Vec<Uuid> = rows.iter().filter_map(|(p, _)| p.image_id).collect();

        let images: HashMap<Uuid, Media> = if image_ids.is_empty() {
            HashMap::new()
        } else {
            MediaEntity::find()
                .filter(media::Column::Id.is_in(image_ids))
                .all(&self.db)
                .await
                .map_err(AppError::from)?
                .into_iter()
                .map(|m| (m.id, Media::from(m)))
                .collect()
        };

        rows.into_iter()
            .map(|(product, category)| {
                let category = category.ok_or_else(|| {
                    AppError::internal(format!("Product {} has no category", product.id))
                })?;
                let image = product.image_id.and_then(|id| images.get(&id).cloned());
                Ok(ProductDetails::expand(
                    Product::from(product),
                    Category::from(category),
                    image,
                ))
            })
            .collect()
    }
}

#[async_trait]
impl ProductRepository for ProductStore {
    async fn find_many(
        &self,
        category_slugs: Option<Vec<String>>,
    ) -> AppResult<Vec<ProductDetails>> {
        let mut query = ProductEntity::find()
            .find_also_related(CategoryEntity)
            .order_by_desc(product::Column::CreatedAt);

        if let Some(slugs) = category_slugs {
            query = query.filter(category::Column::Slug.is_in(slugs));
        }

        let rows = query.all(&self.db).await.map_err(AppError::from)?;
        self.expand(rows).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ProductDetails>> {
        let row = ProductEntity::find_by_id(id)
            .find_also_related(CategoryEntity)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        match row {
            Some(row) => Ok(self.expand(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn find_media(&self, id: Uuid) -> AppResult<Option<Media>> {
        let result = MediaEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Media::from))
    }

    async fn create(&self, input: CreateProduct) -> AppResult<Product> {
        let now = chrono::Utc::now();
        let active_model = ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            description: Set(input.description),
            price: Set(input.price),
            category_id: Set(input.category_id),
            image_id: Set(input.image_id),
            refund_policy: Set(input.refund_policy.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active_model.insert(&self.db).await.map_err(AppError::from)?;
        Ok(Product::from(model))
    }
}
