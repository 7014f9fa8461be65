//! Synchronous driver backed by `rusqlite`

use rusqlite::{params, Connection, OpenFlags};

use super::{COUNT_ROWS, CREATE_TABLE, INSERT_ROW, SELECT_ROW};
use crate::{Result, SqlBenchError};

/// A single `rusqlite` connection
pub struct SyncConnection {
    conn: Connection,
}

impl SyncConnection {
    /// Open a connection. `dsn` is interpreted as an SQLite URI filename.
    pub fn open(dsn: &str) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(dsn, flags).map_err(|e| {
            SqlBenchError::ConnectionError(format!("rusqlite could not open {}: {}", dsn, e))
        })?;

        Ok(Self { conn })
    }

    pub fn create_table(&self) -> Result<()> {
        self.conn
            .execute(CREATE_TABLE, [])
            .map(|_| ())
            .map_err(|e| SqlBenchError::SchemaError(format!("rusqlite: {}", e)))
    }

    pub fn insert(&self, payload: &[u8]) -> Result<()> {
        let mut stmt = self
            .conn
            .prepare_cached(INSERT_ROW)
            .map_err(|e| SqlBenchError::InsertError(format!("rusqlite: {}", e)))?;
        stmt.execute(params![payload])
            .map(|_| ())
            .map_err(|e| SqlBenchError::InsertError(format!("rusqlite: {}", e)))
    }

    pub fn select_one(&self) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare_cached(SELECT_ROW)
            .map_err(|e| SqlBenchError::QueryError(format!("rusqlite: {}", e)))?;
        let mut rows = stmt
            .query([])
            .map_err(|e| SqlBenchError::QueryError(format!("rusqlite: {}", e)))?;
        let found = rows
            .next()
            .map_err(|e| SqlBenchError::QueryError(format!("rusqlite: {}", e)))?
            .is_some();
        Ok(found)
    }

    pub fn count_rows(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row(COUNT_ROWS, [], |row| row.get(0))
            .map_err(|e| SqlBenchError::QueryError(format!("rusqlite: {}", e)))?;
        Ok(count.max(0) as u64)
    }

    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| SqlBenchError::ConnectionError(format!("rusqlite close: {}", e)))
    }
}
