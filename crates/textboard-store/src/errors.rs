//! Error handling for textboard-store
//!
//! Wraps the core `ExError` with store-specific constructors

use std::fmt;
use std::time::Duration;

use textboard_core::errors::{ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Statement could not be prepared or its parameters do not line up
pub fn statement_bind_error(sql: &str, reason: impl Into<String>) -> ExError {
    ExError::new(ExErrorKind::StatementBind)
        .with_op("sec_sql_bind")
        .with_message(format!("{} [sql: {}]", reason.into(), sql))
}

/// A dynamic value has a kind the builder cannot bind
pub fn unsupported_value_kind(kind: &str) -> ExError {
    ExError::new(ExErrorKind::UnsupportedValueKind)
        .with_op("sec_sql_value")
        .with_message(format!(
            "Only integer and text values can be bound, got {}",
            kind
        ))
}

/// Create a migration error
pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Migration)
        .with_op("migration")
        .with_entity_id(migration_id)
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// Create a checksum mismatch error
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ChecksumMismatch)
        .with_op("migration_checksum")
        .with_entity_id(migration_id)
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// No pooled connection became available in time
pub fn pool_timeout(waited: Duration, reason: impl fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Timeout)
        .with_op("pool_checkout")
        .with_message(format!(
            "No connection available after {} ms: {}",
            waited.as_millis(),
            reason
        ))
}

/// The pool could not open its initial connections
pub fn pool_open_error(location: &str, reason: impl fmt::Display) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("pool_open")
        .with_entity_id(location)
        .with_message(format!("Cannot open connection pool: {}", reason))
}

/// Create a database error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

