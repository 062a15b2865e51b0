//! Migrate command - applies the PostgreSQL schema and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;

/// Connect to the configured database and run pending migrations
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let pool = crate::connect_postgres(&config).await?;
    pool.close().await;

    info!("Migrations complete");
    Ok(())
}
