//! Configuration management module
//!
//! Handles loading, saving, and validation of the sweep configuration.
//! Defaults reproduce the reference workload.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bench::workload::PayloadFill;
use crate::driver::DriverKind;
use crate::{
    Result, SqlBenchError, APP_NAME, CONFIG_FILE, DEFAULT_CONNECTION_STRING, DEFAULT_DATA_SIZES,
    DEFAULT_ITERATIONS, DEFAULT_SEED_ROWS, RESULTS_FILE,
};

pub mod persistence;

/// SQLite's default `SQLITE_MAX_LENGTH`; larger blobs are rejected by the engine
pub const MAX_DATA_SIZE: u64 = 1_000_000_000;

/// Sweep configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    /// Drivers to benchmark, in run order
    pub drivers: Vec<DriverKind>,
    /// Payload sizes in bytes, in run order
    pub data_sizes: Vec<u64>,
    /// Statements per timed loop
    pub iterations: usize,
    /// Untimed rows inserted before each read run
    pub seed_rows: usize,
    /// SQLite URI filename handed to both drivers
    pub connection_string: String,
    /// Payload byte pattern
    pub payload_fill: PayloadFill,
    /// What a sweep does when one case fails
    pub on_error: ErrorPolicy,
    /// Result file settings
    pub output: OutputConfig,
}

/// Result file settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// CSV file written after a sweep
    pub csv_path: PathBuf,
    /// Optional JSON export of the full report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_path: Option<PathBuf>,
    /// How durations are rendered in the CSV
    pub duration_format: DurationFormat,
}

/// Failure handling for a sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Stop at the first failed case and return its error
    #[default]
    Abort,
    /// Record the failure, log it, and continue with the next case
    Skip,
}

/// Duration rendering in the CSV `Duration` column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationFormat {
    /// Shortest-unit string such as `1.234567ms`
    #[default]
    Human,
    /// Integer nanoseconds
    Nanos,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(RESULTS_FILE),
            json_path: None,
            duration_format: DurationFormat::Human,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            drivers: DriverKind::all(),
            data_sizes: DEFAULT_DATA_SIZES.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            seed_rows: DEFAULT_SEED_ROWS,
            connection_string: DEFAULT_CONNECTION_STRING.to_string(),
            payload_fill: PayloadFill::Zeros,
            on_error: ErrorPolicy::Abort,
            output: OutputConfig::default(),
        }
    }
}

impl BenchmarkConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.drivers.is_empty() {
            return Err(SqlBenchError::ConfigError(
                "At least one driver must be selected".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for driver in &self.drivers {
            if !seen.insert(driver) {
                return Err(SqlBenchError::ConfigError(format!(
                    "Driver listed more than once: {}",
                    driver
                )));
            }
        }

        if self.data_sizes.is_empty() {
            return Err(SqlBenchError::ConfigError(
                "At least one data size must be given".to_string(),
            ));
        }

        if let Some(size) = self.data_sizes.iter().find(|&&s| s > MAX_DATA_SIZE) {
            return Err(SqlBenchError::ConfigError(format!(
                "Data size too large: {} bytes (max: {} bytes)",
                size, MAX_DATA_SIZE
            )));
        }

        if self.iterations == 0 {
            return Err(SqlBenchError::ConfigError(
                "Iterations must be greater than 0".to_string(),
            ));
        }

        if self.seed_rows == 0 {
            return Err(SqlBenchError::ConfigError(
                "Seed rows must be greater than 0".to_string(),
            ));
        }

        if self.connection_string.trim().is_empty() {
            return Err(SqlBenchError::ConfigError(
                "Connection string must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    pub fn with_drivers(mut self, drivers: Vec<DriverKind>) -> Self {
        self.drivers = drivers;
        self
    }

    pub fn with_data_sizes(mut self, sizes: Vec<u64>) -> Self {
        self.data_sizes = sizes;
        self
    }

    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_seed_rows(mut self, rows: usize) -> Self {
        self.seed_rows = rows;
        self
    }

    pub fn with_connection_string(mut self, dsn: impl Into<String>) -> Self {
        self.connection_string = dsn.into();
        self
    }

    pub fn with_payload_fill(mut self, fill: PayloadFill) -> Self {
        self.payload_fill = fill;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn with_csv_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.csv_path = path.into();
        self
    }

    pub fn with_json_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output.json_path = Some(path.into());
        self
    }

    pub fn with_duration_format(mut self, format: DurationFormat) -> Self {
        self.output.duration_format = format;
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            log::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load and validate configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            SqlBenchError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            SqlBenchError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());

        Ok(config)
    }

    /// Validate and write configuration as pretty TOML
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    SqlBenchError::ConfigError(format!(
                        "Failed to create config directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let content = toml::to_string_pretty(self)?;

        fs::write(path, content).map_err(|e| {
            SqlBenchError::ConfigError(format!(
                "Failed to write config file {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/sqlbench/sqlbench.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            SqlBenchError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_reference_workload() {
        let config = BenchmarkConfig::default();
        assert_eq!(config.drivers, vec![DriverKind::Rusqlite, DriverKind::Sqlx]);
        assert_eq!(config.data_sizes, vec![64, 256, 1024, 4096, 1_048_576]);
        assert_eq!(config.iterations, 100);
        assert_eq!(config.seed_rows, 100);
        assert_eq!(config.connection_string, "file::memory:?cache=shared");
        assert_eq!(config.output.csv_path, PathBuf::from("benchmark_results.csv"));
        assert_eq!(config.on_error, ErrorPolicy::Abort);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let cases = vec![
            BenchmarkConfig::new().with_drivers(vec![]),
            BenchmarkConfig::new().with_drivers(vec![DriverKind::Sqlx, DriverKind::Sqlx]),
            BenchmarkConfig::new().with_data_sizes(vec![]),
            BenchmarkConfig::new().with_data_sizes(vec![64, MAX_DATA_SIZE + 1]),
            BenchmarkConfig::new().with_iterations(0),
            BenchmarkConfig::new().with_seed_rows(0),
            BenchmarkConfig::new().with_connection_string("  "),
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(SqlBenchError::ConfigError(_))),
                "{:?} should be rejected",
                config
            );
        }
    }

    #[test]
    fn test_zero_data_size_is_allowed() {
        let config = BenchmarkConfig::new().with_data_sizes(vec![0]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("sqlbench.toml");

        let config = BenchmarkConfig::new()
            .with_drivers(vec![DriverKind::Sqlx])
            .with_data_sizes(vec![128, 512])
            .with_iterations(10)
            .with_payload_fill(PayloadFill::Random)
            .with_error_policy(ErrorPolicy::Skip)
            .with_json_path("out.json")
            .with_duration_format(DurationFormat::Nanos);

        config.save_to(&path).unwrap();
        let loaded = BenchmarkConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sqlbench.toml");
        fs::write(
            &path,
            "drivers = [\"rusqlite\"]\niterations = 5\non_error = \"skip\"\n\n[output]\nduration_format = \"nanos\"\n",
        )
        .unwrap();

        let loaded = BenchmarkConfig::load_from(&path).unwrap();
        assert_eq!(loaded.drivers, vec![DriverKind::Rusqlite]);
        assert_eq!(loaded.iterations, 5);
        assert_eq!(loaded.seed_rows, DEFAULT_SEED_ROWS);
        assert_eq!(loaded.on_error, ErrorPolicy::Skip);
        assert_eq!(loaded.output.duration_format, DurationFormat::Nanos);
        assert_eq!(loaded.output.csv_path, PathBuf::from(RESULTS_FILE));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sqlbench.toml");
        fs::write(&path, "iterations = 0\n").unwrap();
        assert!(matches!(
            BenchmarkConfig::load_from(&path),
            Err(SqlBenchError::ConfigError(_))
        ));

        fs::write(&path, "drivers = [\"sqlite3\"]\n").unwrap();
        assert!(matches!(
            BenchmarkConfig::load_from(&path),
            Err(SqlBenchError::ConfigError(_))
        ));

        assert!(BenchmarkConfig::load_from(&temp_dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_config_file_path() {
        if let Ok(path) = BenchmarkConfig::config_file_path() {
            assert!(path.ends_with("sqlbench/sqlbench.toml"));
        }
    }
}
