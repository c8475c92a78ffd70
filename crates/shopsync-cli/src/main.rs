mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopsync")]
#[command(about = "Incremental Shopify catalog sync into a local SQLite table")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Sync the product catalog
    Products,
    /// Sync the order history
    Orders,
    /// Sync products, then orders
    All,
    /// Show row counts and maximum ids for both tables
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = shopsync_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = shopsync_db::PoolConfig::from_app_config(&config);
    let pool = shopsync_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = shopsync_db::run_migrations(&pool).await?;
    if applied > 0 {
        tracing::info!(applied, "applied pending migrations");
    }

    match cli.command {
        Commands::Products => {
            commands::sync_products(&pool, &config).await?;
        }
        Commands::Orders => {
            commands::sync_orders(&pool, &config).await?;
        }
        Commands::All => {
            commands::sync_products(&pool, &config).await?;
            commands::sync_orders(&pool, &config).await?;
        }
        Commands::Status => {
            commands::status(&pool).await?;
        }
    }

    Ok(())
}
