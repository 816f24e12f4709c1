//! Text board store - SQLite persistence
//!
//! Provides:
//! - Connection management and a checkout/checkin connection pool
//! - Embedded SQL migrations with checksums
//! - `SecSql`, a statement builder that binds values positionally
//! - `SqliteArticleRepository` implementing the core repository seam

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod sec_sql;

// Re-export key types
pub use db::{ConnectionPool, DbTarget, PoolConfig, PooledConnection};
pub use errors::Result;
pub use repo::SqliteArticleRepository;
pub use sec_sql::{BoundStatement, SecSql, Value};
