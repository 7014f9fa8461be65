//! Asynchronous driver backed by `sqlx`

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use super::{COUNT_ROWS, CREATE_TABLE, INSERT_ROW, SELECT_ROW};
use crate::{Result, SqlBenchError};

/// A single `sqlx` SQLite connection
pub struct AsyncConnection {
    conn: SqliteConnection,
}

impl AsyncConnection {
    /// Open a connection. `dsn` is an SQLite URI filename without the
    /// `sqlite:` scheme, the same string the synchronous driver takes.
    pub async fn open(dsn: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", dsn))
            .map_err(|e| {
                SqlBenchError::ConnectionError(format!("sqlx could not parse {}: {}", dsn, e))
            })?
            .create_if_missing(true);

        let conn = options.connect().await.map_err(|e| {
            SqlBenchError::ConnectionError(format!("sqlx could not open {}: {}", dsn, e))
        })?;

        Ok(Self { conn })
    }

    pub async fn create_table(&mut self) -> Result<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&mut self.conn)
            .await
            .map(|_| ())
            .map_err(|e| SqlBenchError::SchemaError(format!("sqlx: {}", e)))
    }

    pub async fn insert(&mut self, payload: &[u8]) -> Result<()> {
        sqlx::query(INSERT_ROW)
            .bind(payload)
            .execute(&mut self.conn)
            .await
            .map(|_| ())
            .map_err(|e| SqlBenchError::InsertError(format!("sqlx: {}", e)))
    }

    pub async fn select_one(&mut self) -> Result<bool> {
        sqlx::query(SELECT_ROW)
            .fetch_optional(&mut self.conn)
            .await
            .map(|row| row.is_some())
            .map_err(|e| SqlBenchError::QueryError(format!("sqlx: {}", e)))
    }

    pub async fn count_rows(&mut self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(COUNT_ROWS)
            .fetch_one(&mut self.conn)
            .await
            .map_err(|e| SqlBenchError::QueryError(format!("sqlx: {}", e)))?;
        Ok(count.max(0) as u64)
    }

    pub async fn close(self) -> Result<()> {
        self.conn
            .close()
            .await
            .map_err(|e| SqlBenchError::ConnectionError(format!("sqlx close: {}", e)))
    }
}
