//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pool per process, handed to every repository at construction
//! - Every repository call is a single parameterized statement
//! - "No rows" is `Ok(None)`, never an error

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{close_pool, create_pool, PoolOptions};
pub use repos::*;
