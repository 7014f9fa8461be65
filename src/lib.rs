//! SQLBench - SQLite driver latency bench
//!
//! Measures and compares insert/select latency of two embedded SQLite
//! drivers across a range of payload sizes.

use std::fmt;

pub mod bench;
pub mod config;
pub mod console;
pub mod driver;
pub mod models;
pub mod report;
pub mod util;

// Common error types
#[derive(Debug)]
pub enum SqlBenchError {
    /// I/O operation failed
    IoError(std::io::Error),
    /// Configuration validation or parsing error
    ConfigError(String),
    /// Opening a database connection failed
    ConnectionError(String),
    /// Creating the benchmark table failed
    SchemaError(String),
    /// An insert statement failed
    InsertError(String),
    /// A select statement failed or returned nothing
    QueryError(String),
    /// Writing results to disk failed
    PersistenceError(String),
    /// Any other benchmark execution error
    BenchmarkError(String),
}

impl fmt::Display for SqlBenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlBenchError::IoError(err) => write!(f, "I/O error: {}", err),
            SqlBenchError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            SqlBenchError::ConnectionError(msg) => write!(f, "Failed to open database: {}", msg),
            SqlBenchError::SchemaError(msg) => write!(f, "Failed to create table: {}", msg),
            SqlBenchError::InsertError(msg) => write!(f, "Failed to insert data: {}", msg),
            SqlBenchError::QueryError(msg) => write!(f, "Failed to query data: {}", msg),
            SqlBenchError::PersistenceError(msg) => write!(f, "Results persistence error: {}", msg),
            SqlBenchError::BenchmarkError(msg) => write!(f, "Benchmark error: {}", msg),
        }
    }
}

impl std::error::Error for SqlBenchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SqlBenchError::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SqlBenchError {
    fn from(err: std::io::Error) -> Self {
        SqlBenchError::IoError(err)
    }
}

impl From<rusqlite::Error> for SqlBenchError {
    fn from(err: rusqlite::Error) -> Self {
        SqlBenchError::BenchmarkError(format!("rusqlite: {}", err))
    }
}

impl From<sqlx::Error> for SqlBenchError {
    fn from(err: sqlx::Error) -> Self {
        SqlBenchError::BenchmarkError(format!("sqlx: {}", err))
    }
}

impl From<csv::Error> for SqlBenchError {
    fn from(err: csv::Error) -> Self {
        SqlBenchError::PersistenceError(format!("CSV error: {}", err))
    }
}

impl From<serde_json::Error> for SqlBenchError {
    fn from(err: serde_json::Error) -> Self {
        SqlBenchError::PersistenceError(format!("JSON serialization error: {}", err))
    }
}

impl From<toml::de::Error> for SqlBenchError {
    fn from(err: toml::de::Error) -> Self {
        SqlBenchError::ConfigError(format!("TOML parsing error: {}", err))
    }
}

impl From<toml::ser::Error> for SqlBenchError {
    fn from(err: toml::ser::Error) -> Self {
        SqlBenchError::ConfigError(format!("TOML serialization error: {}", err))
    }
}

/// Result type alias for SQLBench operations
pub type Result<T> = std::result::Result<T, SqlBenchError>;

/// Error handling utilities
pub mod error {
    use super::SqlBenchError;

    /// Convert error to user-friendly message with suggestions
    pub fn user_friendly_message(error: &SqlBenchError) -> String {
        match error {
            SqlBenchError::ConnectionError(msg) => {
                format!("Could not open the database ({}). Check the connection string.", msg)
            }
            SqlBenchError::SchemaError(_) => {
                "Could not create the benchmark table. Another connection may still hold the shared in-memory database.".to_string()
            }
            SqlBenchError::ConfigError(msg) => {
                format!("Configuration error: {}. Check your settings.", msg)
            }
            SqlBenchError::PersistenceError(_) => {
                "Failed to save results. Check the output path and permissions.".to_string()
            }
            _ => error.to_string(),
        }
    }

    /// Whether a sweep running with the skip policy can move on to the next case
    pub fn is_case_local(error: &SqlBenchError) -> bool {
        !matches!(
            error,
            SqlBenchError::ConfigError(_) | SqlBenchError::PersistenceError(_)
        )
    }
}

// Common types and constants
pub const APP_NAME: &str = "sqlbench";
pub const CONFIG_FILE: &str = "sqlbench.toml";
pub const RESULTS_FILE: &str = "benchmark_results.csv";
pub const DEFAULT_CONNECTION_STRING: &str = "file::memory:?cache=shared";
pub const DEFAULT_ITERATIONS: usize = 100;
pub const DEFAULT_SEED_ROWS: usize = 100;
pub const DEFAULT_DATA_SIZES: [u64; 5] = [64, 256, 1024, 4096, 1024 * 1024];
