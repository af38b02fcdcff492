//! gRPC clients for calling microservices.

mod catalog_client;

pub use catalog_client::CatalogClient;
