//! Catalog Service Library
//!
//! This crate provides categories and products via gRPC, plus the category
//! seed routine. It can be run as a standalone service or embedded in the
//! combined binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod seed;
pub mod service;

use std::fmt::Display;
use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::{error, info};

use common::RetryPolicy;

use crate::config::CatalogServiceConfig;
use crate::grpc::CatalogGrpcService;
use crate::infra::Database;
use crate::repository::{CategoryStore, ProductStore};
use crate::seed::{SeedReport, Seeder, CATEGORIES};
use crate::service::CatalogManager;

/// Run the catalog service as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogServiceConfig::from_env().with_bind(Some(host.to_string()), Some(port));
    run_server_with_config(config).await
}

/// Run the catalog service standalone. Missing bind values come from
/// `CATALOG_SERVICE_HOST` / `CATALOG_SERVICE_PORT`.
pub async fn run_standalone(
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogServiceConfig::from_env().with_bind(host, port);
    run_server_with_config(config).await
}

/// Run migrations (for CLI commands).
pub async fn run_migrations(action: MigrateAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = CatalogServiceConfig::from_env();
    let db = Database::connect_without_migrations(&config.database).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => {
            let status = db.migration_status().await?;
            for (name, applied) in status {
                let marker = if applied { "[x]" } else { "[ ]" };
                println!("{} {}", marker, name);
            }
        }
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(())
}

/// Upsert the marketplace categories (for CLI commands).
pub async fn run_seed() -> Result<SeedReport, Box<dyn std::error::Error>> {
    let config = CatalogServiceConfig::from_env();
    let db = Database::connect(&config.database).await?;

    let categories = Arc::new(CategoryStore::new(db.get_connection()));
    let seeder = Seeder::new(categories, RetryPolicy::from(&config.seed_retry));

    Ok(seeder.run(CATEGORIES).await?)
}

/// Migration action type.
#[derive(Debug, Clone, Copy)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Log the outcome of a seed run and map it to the process exit code.
pub fn seed_exit_code<E: Display>(result: &Result<SeedReport, E>) -> u8 {
    match result {
        Ok(report) => {
            info!(
                created = report.created,
                updated = report.updated,
                "Seeding completed successfully"
            );
            0
        }
        Err(e) => {
            error!("Error during seeding: {}", e);
            1
        }
    }
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(config: CatalogServiceConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize database
    let db = Database::connect(&config.database).await?;
    db.ping().await?;
    let db_conn = db.get_connection();

    // Create repositories and service
    let category_repo = Arc::new(CategoryStore::new(db_conn.clone()));
    let product_repo = Arc::new(ProductStore::new(db_conn));
    let catalog_service = Arc::new(CatalogManager::new(category_repo, product_repo));

    // Create gRPC service
    let grpc_service = CatalogGrpcService::new(catalog_service);

    // Build address
    let addr: SocketAddr = config.server.bind_addr().parse()?;
    info!("Catalog service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::CatalogServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use sea_orm::DbErr;

    use super::*;
    use common::AppError;

    #[test]
    fn test_seed_success_exits_zero() {
        let result: Result<SeedReport, AppError> = Ok(SeedReport {
            created: 3,
            updated: 1,
        });
        assert_eq!(seed_exit_code(&result), 0);
    }

    #[test]
    fn test_seed_failure_exits_one() {
        let lock: Result<SeedReport, AppError> = Err(AppError::Database(DbErr::Custom(
            "LockTimeout: gave up after 5 attempts".to_string(),
        )));
        assert_eq!(seed_exit_code(&lock), 1);

        let invalid: Result<SeedReport, AppError> =
            Err(AppError::validation("ValidationError: slug is required"));
        assert_eq!(seed_exit_code(&invalid), 1);
    }
}
