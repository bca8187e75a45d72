//! Tenantry Database: SurrealDB connection management and the
//! transactional key-value store built on top of it.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - The key-value engine ([`SurrealStore`], [`SurrealTransaction`])
//! - Error types ([`DbError`])

mod connection;
mod error;
mod schema;
mod store;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::{run_migrations, schema_v1};
pub use store::{SurrealStore, SurrealTransaction};
