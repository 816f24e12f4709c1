//! Database connection management
//!
//! Opens and configures SQLite connections and hands them out through an
//! `r2d2` pool. Every pooled connection is configured by the manager's init
//! hook before first use.

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use textboard_core::errors::io_error;
use uuid::Uuid;

use crate::errors::{from_rusqlite, pool_open_error, pool_timeout, Result};
use crate::migrations::apply_migrations;

/// A checked-out connection; goes back to the pool on drop
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Bounds applied to `PoolConfig::checkout_timeout`
const MIN_CHECKOUT_TIMEOUT: Duration = Duration::from_millis(1);
const MAX_CHECKOUT_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Open a SQLite database at the given path
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    Connection::open(path).map_err(from_rusqlite)
}

/// Open a private in-memory SQLite database (for testing)
pub fn open_in_memory() -> Result<Connection> {
    Connection::open_in_memory().map_err(from_rusqlite)
}

/// Configure a connection with the settings every board connection uses
pub fn configure(conn: &Connection) -> Result<()> {
    apply_pragmas(conn, false).map_err(from_rusqlite)
}

fn apply_pragmas(conn: &Connection, wal: bool) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON")?;
    if wal {
        // journal_mode returns a row, so it cannot go through `execute`
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
    }
    Ok(())
}

/// Where pooled connections point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbTarget {
    File(PathBuf),
    /// A shared-cache in-memory database that lives as long as the pool
    Memory,
}

#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub target: DbTarget,
    pub max_size: usize,
    pub checkout_timeout: Duration,
}

impl PoolConfig {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            target: DbTarget::File(path.into()),
            ..Self::memory()
        }
    }

    pub fn memory() -> Self {
        Self {
            target: DbTarget::Memory,
            max_size: 4,
            checkout_timeout: Duration::from_secs(5),
        }
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.max(1);
        self
    }

    pub fn with_checkout_timeout(mut self, timeout: Duration) -> Self {
        self.checkout_timeout = timeout;
        self
    }
}

/// r2d2 rejects a zero timeout and overflows `Instant` on huge ones
fn bounded_checkout_timeout(requested: Duration) -> Duration {
    requested.clamp(MIN_CHECKOUT_TIMEOUT, MAX_CHECKOUT_TIMEOUT)
}

/// Routes pool-internal connection failures into `tracing`
#[derive(Debug)]
struct TracingErrorHandler;

impl r2d2::HandleError<rusqlite::Error> for TracingErrorHandler {
    fn handle_error(&self, error: rusqlite::Error) {
        tracing::warn!(error = %error, "pooled connection failed");
    }
}

/// Bounded pool of SQLite connections
///
/// Holds `max_size` connections. Checkout blocks for at most
/// `checkout_timeout` when every connection is in use.
pub struct ConnectionPool {
    inner: r2d2::Pool<SqliteConnectionManager>,
    location: String,
    checkout_timeout: Duration,
}

impl ConnectionPool {
    /// Build the pool and bring the schema up to date
    ///
    /// # Errors
    ///
    /// `Io` when the database directory cannot be created, `Persistence` when
    /// the connections cannot be opened, `Migration` when the migrations fail.
    pub fn open(config: PoolConfig) -> Result<Self> {
        let (location, wal) = match &config.target {
            DbTarget::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| io_error("create_db_dir", e))?;
                }
                (path.to_string_lossy().into_owned(), true)
            }
            DbTarget::Memory => (
                format!("file:textboard-{}?mode=memory&cache=shared", Uuid::now_v7()),
                false,
            ),
        };

        let checkout_timeout = bounded_checkout_timeout(config.checkout_timeout);
        let max_size = u32::try_from(config.max_size.max(1)).unwrap_or(u32::MAX);

        let manager = SqliteConnectionManager::file(&location)
            .with_init(move |conn| apply_pragmas(conn, wal));

        // Idle connections are never reaped: a shared-cache memory database
        // disappears with its last connection.
        let inner = r2d2::Pool::builder()
            .max_size(max_size)
            .connection_timeout(checkout_timeout)
            .idle_timeout(None)
            .max_lifetime(None)
            .error_handler(Box::new(TracingErrorHandler))
            .build(manager)
            .map_err(|e| pool_open_error(&location, e))?;

        let pool = Self {
            inner,
            location,
            checkout_timeout,
        };

        {
            let mut conn = pool.get()?;
            apply_migrations(&mut conn)?;
        }

        tracing::info!(
            location = %pool.location,
            max_size = pool.max_size(),
            "connection pool ready"
        );

        Ok(pool)
    }

    /// Check out a connection, waiting up to the checkout timeout
    ///
    /// # Errors
    ///
    /// `Timeout` when no connection frees up in time.
    pub fn get(&self) -> Result<PooledConnection> {
        self.inner
            .get()
            .map_err(|e| pool_timeout(self.checkout_timeout, e))
    }

    /// Connections currently opened by the pool (idle or checked out)
    pub fn open_count(&self) -> usize {
        self.inner.state().connections as usize
    }

    pub fn idle_count(&self) -> usize {
        self.inner.state().idle_connections as usize
    }

    pub fn max_size(&self) -> usize {
        self.inner.max_size() as usize
    }

    pub fn checkout_timeout(&self) -> Duration {
        self.checkout_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configure_enables_foreign_keys() {
        let conn = open_in_memory().unwrap();
        configure(&conn).unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_pool_config_builders() {
        let config = PoolConfig::file("board.db")
            .with_max_size(0)
            .with_checkout_timeout(Duration::from_millis(10));

        assert_eq!(config.target, DbTarget::File(PathBuf::from("board.db")));
        assert_eq!(config.max_size, 1);
        assert_eq!(config.checkout_timeout, Duration::from_millis(10));
    }

    #[test]
    fn test_pooled_connections_are_configured() {
        let pool = ConnectionPool::open(PoolConfig::memory().with_max_size(1)).unwrap();
        let fk: i64 = pool
            .get()
            .unwrap()
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_checkout_timeout_is_clamped() {
        let huge = ConnectionPool::open(
            PoolConfig::memory().with_checkout_timeout(Duration::from_millis(u64::MAX)),
        )
        .unwrap();
        assert_eq!(huge.checkout_timeout(), MAX_CHECKOUT_TIMEOUT);
        assert!(huge.get().is_ok());

        assert_eq!(bounded_checkout_timeout(Duration::ZERO), MIN_CHECKOUT_TIMEOUT);
        assert_eq!(
            bounded_checkout_timeout(Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }
}
