//! streamctl-server: HTTP API over recorded broadcast streams
//!
//! Layers, leaf to root:
//! - `db`: PostgreSQL pool, schema bootstrap and repositories
//! - `models`: validated request inputs
//! - `http`: axum server, extractors, routes and error mapping

pub mod db;
pub mod http;
pub mod models;

pub use db::{create_pool, DbError, PoolOptions};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig};
