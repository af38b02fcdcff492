//! gRPC transport for the catalog service.

mod catalog_grpc;

pub use catalog_grpc::CatalogGrpcService;
