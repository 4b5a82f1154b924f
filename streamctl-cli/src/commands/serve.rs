//! HTTP server command
//!
//! Connects the pool, applies the schema and serves the stream API until
//! Ctrl+C/SIGTERM.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};

use streamctl_server::db::{create_pool, migrations, PoolOptions};
use streamctl_server::http::{run_server, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(
        long,
        env = "DATABASE_MAX_CONNECTIONS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_connections: u32,

    /// Seconds a request may wait on the database (pool checkout included)
    #[arg(
        long,
        env = "REQUEST_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub request_timeout: u64,

    /// Allow any CORS origin; `false` limits to localhost on this port
    #[arg(long, env = "CORS_PERMISSIVE", default_value_t = true, action = ArgAction::Set)]
    pub cors_permissive: bool,

    /// Don't create missing tables on startup
    #[arg(long)]
    pub skip_migrations: bool,
}

impl ServeArgs {
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: self.cors_permissive,
            request_timeout: Duration::from_secs(self.request_timeout),
        }
    }

    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_connections: self.max_connections,
            acquire_timeout: Duration::from_secs(self.request_timeout),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();
    tracing::info!(
        max_connections = args.max_connections,
        "Starting streamctl server on {}",
        config.bind_addr
    );

    let pool = create_pool(&args.database_url, args.pool_options())
        .await
        .context("Failed to connect to database")?;

    if args.skip_migrations {
        tracing::info!("Skipping schema migrations");
    } else {
        migrations::run(&pool)
            .await
            .context("Failed to apply schema migrations")?;
    }

    // Blocks until shutdown; closes the pool on the way out
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
