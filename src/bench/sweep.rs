//! Driver x size sweep
//!
//! Runs every configured (driver, data size, operation) case in a fixed
//! order, logging each result and streaming progress over a tokio channel.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::bench::runner::Runner;
use crate::config::{BenchmarkConfig, ErrorPolicy};
use crate::driver::DriverKind;
use crate::error::is_case_local;
use crate::models::{BenchmarkResult, Operation};
use crate::Result;

/// One (driver, operation, size) combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BenchmarkCase {
    pub driver: DriverKind,
    pub operation: Operation,
    pub data_size: u64,
}

impl BenchmarkCase {
    /// Benchmark id such as `rusqlite_Write_64Bytes`
    pub fn bench_name(&self) -> String {
        let op = match self.operation {
            Operation::Write => "Write",
            Operation::Read => "Read",
        };
        format!("{}_{}_{}Bytes", self.driver, op, self.data_size)
    }
}

impl fmt::Display for BenchmarkCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}B", self.driver, self.operation, self.data_size)
    }
}

/// A case that failed under `ErrorPolicy::Skip`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseFailure {
    pub case: BenchmarkCase,
    pub error: String,
}

/// Progress update sent after each case
#[derive(Debug, Clone)]
pub struct SweepProgress {
    /// Cases finished so far, including failed ones
    pub completed: usize,
    pub total: usize,
    /// Case that just finished
    pub case: BenchmarkCase,
}

impl SweepProgress {
    /// Calculate completion percentage (0.0 to 1.0)
    pub fn completion_percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Everything a sweep produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// Results in case order
    pub results: Vec<BenchmarkResult>,
    pub failures: Vec<CaseFailure>,
}

impl SweepReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            results: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// True when every case produced a result
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

impl Default for SweepReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Sweep executor
pub struct Sweep {
    config: BenchmarkConfig,
    runner: Runner,
}

impl Sweep {
    /// Create a sweep from a validated configuration
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        config.validate()?;
        let runner = Runner::from_config(&config);
        Ok(Self { config, runner })
    }

    /// All cases in run order: driver, then data size, then write before read
    pub fn cases(&self) -> Vec<BenchmarkCase> {
        let mut cases = Vec::new();
        for &driver in &self.config.drivers {
            for &data_size in &self.config.data_sizes {
                for operation in Operation::all() {
                    cases.push(BenchmarkCase {
                        driver,
                        operation,
                        data_size,
                    });
                }
            }
        }
        cases
    }

    /// Execute every case sequentially
    pub async fn run(&self, progress_tx: Option<mpsc::Sender<SweepProgress>>) -> Result<SweepReport> {
        let cases = self.cases();
        let total = cases.len();
        let iterations = self.config.iterations;
        let mut report = SweepReport::new();

        log::info!(
            "Running {} cases: {} driver(s) x {} size(s) x 2 operations, {} iterations each",
            total,
            self.config.drivers.len(),
            self.config.data_sizes.len(),
            iterations
        );

        for (index, case) in cases.into_iter().enumerate() {
            let outcome = self
                .runner
                .run(case.driver, case.operation, case.data_size, iterations)
                .await;

            match outcome {
                Ok(duration) => {
                    let result = BenchmarkResult::new(
                        case.driver.label(),
                        case.operation,
                        case.data_size,
                        duration,
                        iterations as u64,
                    );
                    log::info!("{}", result.summary());
                    report.results.push(result);
                }
                Err(err) => {
                    if self.config.on_error == ErrorPolicy::Abort || !is_case_local(&err) {
                        log::error!("{} failed, aborting sweep: {}", case, err);
                        return Err(err);
                    }
                    log::error!("{} failed, skipping: {}", case, err);
                    report.failures.push(CaseFailure {
                        case,
                        error: err.to_string(),
                    });
                }
            }

            if let Some(tx) = &progress_tx {
                let update = SweepProgress {
                    completed: index + 1,
                    total,
                    case,
                };
                if tx.send(update).await.is_err() {
                    log::debug!("Progress receiver dropped");
                }
            }
        }

        report.finish();
        Ok(report)
    }
}
