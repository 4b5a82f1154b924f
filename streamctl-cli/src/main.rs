//! streamctl CLI - run and manage the stream records API
//!
//! - `serve`: HTTP API over PostgreSQL (`/api/v1/streams`)
//! - `migrate`: create the users/streams schema and exit

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, info};

mod commands;
mod config;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "streamctl",
    author,
    version,
    about = "REST backend for recorded broadcast streams",
    long_about = "Serve CRUD endpoints for stream records backed by PostgreSQL. \
                  Settings come from flags, environment variables or a .env file."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create missing tables and indexes, then exit
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing: flags fall back to variables the .env may define
    let dotenv = config::load_dotenv();
    let cli = Cli::parse();

    init_tracing(&TracingConfig { debug: cli.debug }).ok();
    match dotenv {
        Some(path) => info!("Loaded configuration from {}", path.display()),
        None => debug!("No .env file found, using environment variables only"),
    }

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }

    Ok(())
}
