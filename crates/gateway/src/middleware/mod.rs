//! Shared request-path infrastructure.

mod cache;

pub use cache::Cache;
