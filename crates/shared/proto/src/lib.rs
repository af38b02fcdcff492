//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for:
//! - CatalogService: categories, products query and product creation

/// Catalog service definitions.
pub mod catalog {
    tonic::include_proto!("catalog");
}

// Re-export commonly used items
pub use catalog::catalog_service_client::CatalogServiceClient;
pub use catalog::catalog_service_server::{CatalogService, CatalogServiceServer};
