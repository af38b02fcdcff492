//! Catalog service - Handles category navigation and product browsing.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use common::{AppError, AppResult, OptionExt};
use domain::{CategoryNode, CreateProduct, ProductDetails};

use crate::repository::{CategoryRepository, ProductRepository};

/// Catalog service trait for dependency injection.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Top-level categories with their direct subcategories, sorted by name
    async fn list_categories(&self) -> AppResult<Vec<CategoryNode>>;

    /// Category by slug with its direct subcategories
    async fn get_category(&self, slug: &str) -> AppResult<CategoryNode>;

    /// Products in a category and its subcategories, or all products when
    /// no category is given
    async fn get_many_products(&self, category: Option<&str>) -> AppResult<Vec<ProductDetails>>;

    /// Create a product after checking its references
    async fn create_product(&self, input: CreateProduct) -> AppResult<ProductDetails>;
}

/// Concrete implementation of CatalogService using repositories.
pub struct CatalogManager {
    categories: Arc<dyn CategoryRepository>,
    products: Arc<dyn ProductRepository>,
}

impl CatalogManager {
    /// Create new catalog service instance with repositories
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        products: Arc<dyn ProductRepository>,
    ) -> Self {
        Self {
            categories,
            products,
        }
    }
}

#[async_trait]
impl CatalogService for CatalogManager {
    async fn list_categories(&self) -> AppResult<Vec<CategoryNode>> {
        let categories = self.categories.list().await?;
        Ok(CategoryNode::build_tree(categories))
    }

    async fn get_category(&self, slug: &str) -> AppResult<CategoryNode> {
        let category = self.categories.find_by_slug(slug).await?.ok_or_not_found()?;
        let subcategories = self.categories.list_children(category.id).await?;

        let mut node = CategoryNode::new(category);
        node.subcategories = subcategories;
        Ok(node)
    }

    async fn get_many_products(&self, category: Option<&str>) -> AppResult<Vec<ProductDetails>> {
        // An empty filter behaves like no filter
        let slugs = match category.filter(|slug| !slug.is_empty()) {
            Some(slug) => Some(self.get_category(slug).await?.slugs()),
            None => None,
        };

        debug!(?slugs, "Querying products");
        self.products.find_many(slugs).await
    }

    async fn create_product(&self, input: CreateProduct) -> AppResult<ProductDetails> {
        input.validate()?;

        if self.categories.find_by_id(input.category_id).await?.is_none() {
            return Err(AppError::validation("Category does not exist"));
        }

        if let Some(image_id) = input.image_id {
            if self.products.find_media(image_id).await?.is_none() {
                return Err(AppError::validation("Image does not exist"));
            }
        }

        let product = self.products.create(input).await?;
        self.products
            .find_by_id(product.id)
            .await?
            .ok_or_else(|| AppError::internal(format!("Product {} vanished after insert", product.id)))
    }
}
