//! Database driver registry
//!
//! Maps human-readable driver labels to the SQLite access layers being
//! compared and wraps both behind a single connection handle.

pub mod async_conn;
pub mod sync_conn;

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::{Result, SqlBenchError};

pub use async_conn::AsyncConnection;
pub use sync_conn::SyncConnection;

pub const CREATE_TABLE: &str = "CREATE TABLE test (data BLOB)";
pub const INSERT_ROW: &str = "INSERT INTO test (data) VALUES (?)";
pub const SELECT_ROW: &str = "SELECT data FROM test LIMIT 1";
pub const COUNT_ROWS: &str = "SELECT COUNT(*) FROM test";

/// Driver implementations under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverKind {
    /// Synchronous bindings (`rusqlite`)
    Rusqlite,
    /// Asynchronous driver with a per-connection worker thread (`sqlx`)
    Sqlx,
}

/// Ordered driver registry. Sweeps iterate drivers in this order.
pub const DRIVERS: [(&str, DriverKind); 2] = [
    ("rusqlite", DriverKind::Rusqlite),
    ("sqlx", DriverKind::Sqlx),
];

impl DriverKind {
    /// Label used in logs and result files
    pub fn label(&self) -> &'static str {
        match self {
            DriverKind::Rusqlite => "rusqlite",
            DriverKind::Sqlx => "sqlx",
        }
    }

    /// All registered drivers in registry order
    pub fn all() -> Vec<DriverKind> {
        DRIVERS.iter().map(|(_, kind)| *kind).collect()
    }
}

impl fmt::Display for DriverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DriverKind {
    type Err = SqlBenchError;

    fn from_str(s: &str) -> Result<Self> {
        DRIVERS
            .iter()
            .find(|(label, _)| label.eq_ignore_ascii_case(s.trim()))
            .map(|(_, kind)| *kind)
            .ok_or_else(|| SqlBenchError::ConfigError(format!("Unknown driver: {}", s)))
    }
}

static MEMORY_DB_SEQ: AtomicU64 = AtomicU64::new(0);

/// Build a shared-cache in-memory URI that no other caller in this process uses.
///
/// Connections opened on the default `file::memory:?cache=shared` all see one
/// database, so concurrent users (test threads, parallel benches) need
/// distinct names.
pub fn isolated_memory_dsn(tag: &str) -> String {
    let seq = MEMORY_DB_SEQ.fetch_add(1, Ordering::Relaxed);
    format!(
        "file:{}-{}-{}?mode=memory&cache=shared",
        tag,
        std::process::id(),
        seq
    )
}

/// An open connection on either driver.
///
/// Dropping the handle releases the connection; `close` does so explicitly
/// and reports close failures.
pub enum Database {
    Sync(SyncConnection),
    Async(AsyncConnection),
}

impl Database {
    /// Open a connection with the given driver
    pub async fn open(driver: DriverKind, dsn: &str) -> Result<Self> {
        log::debug!("Opening {} connection on {}", driver, dsn);
        match driver {
            DriverKind::Rusqlite => Ok(Database::Sync(SyncConnection::open(dsn)?)),
            DriverKind::Sqlx => Ok(Database::Async(AsyncConnection::open(dsn).await?)),
        }
    }

    pub fn driver(&self) -> DriverKind {
        match self {
            Database::Sync(_) => DriverKind::Rusqlite,
            Database::Async(_) => DriverKind::Sqlx,
        }
    }

    pub async fn create_table(&mut self) -> Result<()> {
        match self {
            Database::Sync(conn) => conn.create_table(),
            Database::Async(conn) => conn.create_table().await,
        }
    }

    pub async fn insert(&mut self, payload: &[u8]) -> Result<()> {
        match self {
            Database::Sync(conn) => conn.insert(payload),
            Database::Async(conn) => conn.insert(payload).await,
        }
    }

    /// Run the single-row select. Returns whether a row came back; the cursor
    /// is released before this returns.
    pub async fn select_one(&mut self) -> Result<bool> {
        match self {
            Database::Sync(conn) => conn.select_one(),
            Database::Async(conn) => conn.select_one().await,
        }
    }

    pub async fn count_rows(&mut self) -> Result<u64> {
        match self {
            Database::Sync(conn) => conn.count_rows(),
            Database::Async(conn) => conn.count_rows().await,
        }
    }

    pub async fn close(self) -> Result<()> {
        match self {
            Database::Sync(conn) => conn.close(),
            Database::Async(conn) => conn.close().await,
        }
    }
}
