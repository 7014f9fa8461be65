//! Timed write and read runners
//!
//! Each run opens a fresh connection, creates the `test` table, times a
//! fixed number of statements and closes the connection again, on the error
//! path as well.

use std::time::{Duration, Instant};

use crate::bench::workload::{generate_payload, PayloadFill};
use crate::config::BenchmarkConfig;
use crate::driver::{Database, DriverKind};
use crate::models::Operation;
use crate::{Result, SqlBenchError, DEFAULT_CONNECTION_STRING, DEFAULT_ITERATIONS, DEFAULT_SEED_ROWS};

/// Runs single benchmark cases against one connection string
#[derive(Debug, Clone)]
pub struct Runner {
    dsn: String,
    seed_rows: usize,
    fill: PayloadFill,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECTION_STRING)
    }
}

impl Runner {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            seed_rows: DEFAULT_SEED_ROWS,
            fill: PayloadFill::Zeros,
        }
    }

    pub fn from_config(config: &BenchmarkConfig) -> Self {
        Self {
            dsn: config.connection_string.clone(),
            seed_rows: config.seed_rows,
            fill: config.payload_fill,
        }
    }

    /// Set the number of untimed rows inserted before a read run
    pub fn with_seed_rows(mut self, rows: usize) -> Self {
        self.seed_rows = rows;
        self
    }

    /// Run `operation` and return the elapsed time of its timed loop
    pub async fn run(
        &self,
        driver: DriverKind,
        operation: Operation,
        data_size: u64,
        iterations: usize,
    ) -> Result<Duration> {
        match operation {
            Operation::Write => self.write(driver, data_size, iterations).await,
            Operation::Read => self.read(driver, data_size, iterations).await,
        }
    }

    /// Time `iterations` single-row inserts of a `data_size` byte blob
    pub async fn write(&self, driver: DriverKind, data_size: u64, iterations: usize) -> Result<Duration> {
        let payload = generate_payload(data_size, self.fill);
        let mut db = Database::open(driver, &self.dsn).await?;

        let outcome = async {
            db.create_table().await?;
            log::debug!("{} created table test", driver);
            timed_inserts(&mut db, &payload, iterations).await
        }
        .await;

        finish(db, outcome).await
    }

    /// Seed the table, then time `iterations` `LIMIT 1` selects
    pub async fn read(&self, driver: DriverKind, data_size: u64, iterations: usize) -> Result<Duration> {
        let payload = generate_payload(data_size, self.fill);
        let mut db = Database::open(driver, &self.dsn).await?;

        let outcome = async {
            db.create_table().await?;
            log::debug!("{} created table test", driver);
            seed_rows(&mut db, &payload, self.seed_rows).await?;
            timed_selects(&mut db, iterations).await
        }
        .await;

        finish(db, outcome).await
    }
}

/// Reference write workload: default connection string, 100 inserts
pub async fn run_write(driver: DriverKind, data_size: u64) -> Result<Duration> {
    Runner::default().write(driver, data_size, DEFAULT_ITERATIONS).await
}

/// Reference read workload: default connection string, 100 seeded rows, 100 selects
pub async fn run_read(driver: DriverKind, data_size: u64) -> Result<Duration> {
    Runner::default().read(driver, data_size, DEFAULT_ITERATIONS).await
}

/// Insert `payload` `iterations` times; the clock covers only the insert loop
pub async fn timed_inserts(db: &mut Database, payload: &[u8], iterations: usize) -> Result<Duration> {
    let start = Instant::now();
    for _ in 0..iterations {
        db.insert(payload).await?;
    }
    Ok(start.elapsed())
}

/// Untimed setup for read runs
pub async fn seed_rows(db: &mut Database, payload: &[u8], rows: usize) -> Result<()> {
    for _ in 0..rows {
        db.insert(payload).await?;
    }
    Ok(())
}

/// Issue `iterations` single-row selects. The table must be non-empty.
pub async fn timed_selects(db: &mut Database, iterations: usize) -> Result<Duration> {
    let start = Instant::now();
    for i in 0..iterations {
        if !db.select_one().await? {
            return Err(SqlBenchError::QueryError(format!(
                "select {} of {} returned no rows",
                i + 1,
                iterations
            )));
        }
    }
    Ok(start.elapsed())
}

async fn finish(db: Database, outcome: Result<Duration>) -> Result<Duration> {
    let driver = db.driver();
    let closed = db.close().await;
    match outcome {
        Ok(elapsed) => {
            closed?;
            log::debug!("{} run finished in {:?}", driver, elapsed);
            Ok(elapsed)
        }
        Err(err) => {
            if let Err(close_err) = closed {
                log::warn!("{} connection did not close cleanly: {}", driver, close_err);
            }
            Err(err)
        }
    }
}
