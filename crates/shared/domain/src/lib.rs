//! Domain layer - Catalog entities, value objects and pure storefront logic.
//!
//! This crate contains pure domain logic with no infrastructure dependencies.
//! All types here are shared across the catalog service and the gateway.

pub mod category;
pub mod constants;
pub mod error;
pub mod layout;
pub mod product;

pub use category::{Category, CategoryNode, UpsertCategory};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use layout::{visible_count, CategoryOverflow, Measure, Measurements};
pub use product::{CreateProduct, Media, Product, ProductDetails, RefundPolicy};
