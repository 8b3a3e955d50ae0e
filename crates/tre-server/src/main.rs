//! TRE Server — application entry point.
//!
//! Loads configuration, connects to SurrealDB, applies pending schema
//! migrations and waits until interrupted.

use tracing_subscriber::EnvFilter;
use tre_core::TreConfig;
use tre_db::{DbConfig, DbManager};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("tre=info".parse()?))
        .json()
        .init();

    let tre_config = TreConfig::from_env()?;
    let db_config = DbConfig::from_env();

    tracing::info!(tre_id = %tre_config.tre_id, "Starting TRE server...");

    let manager = DbManager::connect(&db_config).await?;
    tre_db::run_migrations(manager.client()).await?;

    tracing::info!("Schema up to date");

    tokio::signal::ctrl_c().await?;

    tracing::info!("TRE server stopped.");
    Ok(())
}
