//! Common utilities shared across the catalog service and the gateway.
//!
//! This crate provides:
//! - Unified error handling for HTTP and gRPC
//! - Configuration structures
//! - Retry of storage operations that hit transient lock contention

pub mod config;
pub mod error;
pub mod retry;

pub use config::*;
pub use error::{AppError, AppResult, OptionExt};
pub use retry::{is_transient_lock_error, with_retry, RetryPolicy};
