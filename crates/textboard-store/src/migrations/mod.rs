//! Migration framework
//!
//! - Embedded SQL migrations applied in order
//! - Idempotent application tracked in `schema_version`
//! - Checksums that catch edited migrations

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
