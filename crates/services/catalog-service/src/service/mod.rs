//! Service layer - catalog business logic.

mod catalog_service;

pub use catalog_service::{CatalogManager, CatalogService};
