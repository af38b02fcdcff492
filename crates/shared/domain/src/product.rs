//! Product domain entity and related types.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::category::Category;
use crate::constants::{MAX_NAME_LENGTH, MIN_PRICE, REFUND_POLICY_VALUES};
use crate::error::{DomainError, DomainResult};

/// Refund window offered on a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum RefundPolicy {
    #[serde(rename = "no-refunds")]
    NoRefunds,
    #[serde(rename = "1-day")]
    OneDay,
    #[serde(rename = "3-day")]
    ThreeDays,
    #[serde(rename = "7-day")]
    SevenDays,
    #[serde(rename = "14-day")]
    FourteenDays,
    #[default]
    #[serde(rename = "30-day")]
    ThirtyDays,
}

impl RefundPolicy {
    /// Wire value of this policy
    pub fn as_str(&self) -> &'static str {
        match self {
            RefundPolicy::NoRefunds => "no-refunds",
            RefundPolicy::OneDay => "1-day",
            RefundPolicy::ThreeDays => "3-day",
            RefundPolicy::SevenDays => "7-day",
            RefundPolicy::FourteenDays => "14-day",
            RefundPolicy::ThirtyDays => "30-day",
        }
    }
}

impl FromStr for RefundPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no-refunds" => Ok(RefundPolicy::NoRefunds),
            "1-day" => Ok(RefundPolicy::OneDay),
            "3-day" => Ok(RefundPolicy::ThreeDays),
            "7-day" => Ok(RefundPolicy::SevenDays),
            "14-day" => Ok(RefundPolicy::FourteenDays),
            "30-day" => Ok(RefundPolicy::ThirtyDays),
            other => Err(DomainError::validation(format!(
                "Invalid refund policy '{}', expected one of: {}",
                other,
                REFUND_POLICY_VALUES.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for RefundPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Uploaded media referenced by products
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Media {
    pub id: Uuid,
    /// Alternative text
    pub alt: String,
    /// Public URL of the file
    pub url: String,
}

/// Product domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Price in USD
    pub price: f64,
    pub category_id: Uuid,
    pub image_id: Option<Uuid>,
    pub refund_policy: RefundPolicy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product with its category and image expanded one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProductDetails {
    pub id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Price in USD
    pub price: f64,
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Media>,
    pub refund_policy: RefundPolicy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProductDetails {
    /// Expand a product with its resolved relationships
    pub fn expand(product: Product, category: Category, image: Option<Media>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category,
            image,
            refund_policy: product.refund_policy,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

/// Product creation data transfer object
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: Option<String>,
    /// Price in USD
    pub price: f64,
    pub category_id: Uuid,
    pub image_id: Option<Uuid>,
    #[serde(default)]
    pub refund_policy: RefundPolicy,
}

impl CreateProduct {
    /// Validate fields at the boundary
    pub fn validate(&self) -> DomainResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("Product name cannot be empty"));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(DomainError::validation("Product name is too long"));
        }
        if !self.price.is_finite() || self.price < MIN_PRICE {
            return Err(DomainError::validation("Price must be a non-negative number"));
        }
        Ok(())
    }
}
