//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use streamctl_server::db::{close_pool, create_pool, migrations, PoolOptions};

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,
}

/// Create the users and streams tables if missing, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let options = PoolOptions {
        max_connections: 1,
        ..PoolOptions::default()
    };
    let pool = create_pool(&args.database_url, options)
        .await
        .context("Failed to connect to database")?;

    let applied = migrations::run(&pool).await;
    close_pool(&pool).await;
    applied.context("Failed to apply schema migrations")?;

    tracing::info!("Schema is up to date");
    Ok(())
}
