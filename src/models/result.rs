//! Benchmark result data models
//!
//! One `BenchmarkResult` is produced per (driver, operation, size)
//! combination once its timed loop finishes.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::units::{calculate_ops_per_sec, format_duration};
use crate::{Result, SqlBenchError};

/// Timed operation kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Single-row inserts
    Write,
    /// Single-row `LIMIT 1` selects
    Read,
}

impl Operation {
    /// Both operations, in the order a sweep runs them
    pub fn all() -> [Operation; 2] {
        [Operation::Write, Operation::Read]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Write => "write",
            Operation::Read => "read",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SqlBenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "write" => Ok(Operation::Write),
            "read" => Ok(Operation::Read),
            other => Err(SqlBenchError::ConfigError(format!("Unknown operation: {}", other))),
        }
    }
}

/// Outcome of one timed run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkResult {
    /// Driver label
    pub driver: String,
    /// Operation that was timed
    pub operation: Operation,
    /// Payload size in bytes
    pub data_size: u64,
    /// Wall-clock time of the timed loop
    #[serde(with = "duration_serde")]
    pub duration: Duration,
    /// Statements executed inside the timed loop
    pub iterations: u64,
}

impl BenchmarkResult {
    pub fn new(
        driver: impl Into<String>,
        operation: Operation,
        data_size: u64,
        duration: Duration,
        iterations: u64,
    ) -> Self {
        Self {
            driver: driver.into(),
            operation,
            data_size,
            duration,
            iterations,
        }
    }

    /// Mean wall-clock time per statement
    pub fn per_operation(&self) -> Duration {
        if self.iterations == 0 {
            return Duration::ZERO;
        }
        let nanos = self.duration.as_nanos() / self.iterations as u128;
        Duration::from_nanos(nanos.min(u64::MAX as u128) as u64)
    }

    /// Statements per second over the timed loop
    pub fn ops_per_second(&self) -> f64 {
        calculate_ops_per_sec(self.iterations, self.duration)
    }

    /// One-line description in the form used by the sweep log
    pub fn summary(&self) -> String {
        format!(
            "Driver: {}, Operation: {}, DataSize: {} bytes, Duration: {}",
            self.driver,
            self.operation,
            self.data_size,
            format_duration(self.duration)
        )
    }
}

/// Durations are stored as integer nanoseconds
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let nanos = duration.as_nanos().min(u64::MAX as u128) as u64;
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let nanos = u64::deserialize(deserializer)?;
        Ok(Duration::from_nanos(nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BenchmarkResult {
        BenchmarkResult::new(
            "rusqlite",
            Operation::Write,
            1024,
            Duration::from_millis(2),
            100,
        )
    }

    #[test]
    fn test_operation_parse_and_display() {
        assert_eq!("write".parse::<Operation>().unwrap(), Operation::Write);
        assert_eq!("READ".parse::<Operation>().unwrap(), Operation::Read);
        assert!("update".parse::<Operation>().is_err());
        assert_eq!(Operation::Read.to_string(), "read");
        assert_eq!(Operation::all(), [Operation::Write, Operation::Read]);
    }

    #[test]
    fn test_per_operation_latency() {
        let result = sample();
        assert_eq!(result.per_operation(), Duration::from_micros(20));

        let empty = BenchmarkResult::new("sqlx", Operation::Read, 64, Duration::from_millis(1), 0);
        assert_eq!(empty.per_operation(), Duration::ZERO);
        assert_eq!(empty.ops_per_second(), 0.0);
    }

    #[test]
    fn test_rates() {
        let result = sample();
        assert!((result.ops_per_second() - 50_000.0).abs() < 1.0);
    }

    #[test]
    fn test_summary_line() {
        assert_eq!(
            sample().summary(),
            "Driver: rusqlite, Operation: write, DataSize: 1024 bytes, Duration: 2ms"
        );
    }

    #[test]
    fn test_json_stores_nanoseconds() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["duration"], 2_000_000);
        assert_eq!(json["operation"], "write");

        let back: BenchmarkResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
