//! Combined binary for development - runs the catalog service and the
//! gateway in one process.

use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(about = "Combined storefront binary for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "3000")]
        gateway_port: u16,
        #[arg(long, default_value = "50052")]
        catalog_port: u16,
    },
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Upsert the marketplace categories
    Seed,
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for catalog_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            catalog_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:         http://{}:{}", host, gateway_port);
            info!("  Catalog service: http://{}:{}", host, catalog_port);

            // Spawn catalog-service first (it owns the database)
            let catalog_host = host.clone();
            let catalog_handle = tokio::spawn(async move {
                if let Err(e) = catalog_service_lib::run_embedded(&catalog_host, catalog_port).await {
                    error!("Catalog service failed: {}", e);
                }
            });

            // Wait a moment for catalog-service to start
            tokio::time::sleep(Duration::from_millis(500)).await;

            let gateway_handle = tokio::spawn(async move {
                if let Err(e) = gateway_lib::run_embedded(&host, gateway_port, catalog_port).await {
                    error!("Gateway failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = catalog_handle => {
                    error!("Catalog service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            catalog_service_lib::run_migrations(action.into()).await?;
        }
        Commands::Seed => {
            let result = catalog_service_lib::run_seed().await;
            std::process::exit(i32::from(catalog_service_lib::seed_exit_code(&result)));
        }
    }

    Ok(())
}
