//! Results persistence module
//!
//! Writes sweep results as CSV (the primary output) and optionally as a
//! versioned JSON document.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bench::sweep::SweepReport;
use crate::config::DurationFormat;
use crate::models::BenchmarkResult;
use crate::util::units::format_duration;
use crate::{Result, SqlBenchError};

pub const CSV_HEADERS: [&str; 4] = ["Driver", "Operation", "DataSize", "Duration"];

const RESULTS_FILE_VERSION: u32 = 1;

/// JSON export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsFile {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: SweepReport,
}

/// Render a duration for the CSV `Duration` column
pub fn render_duration(result: &BenchmarkResult, format: DurationFormat) -> String {
    match format {
        DurationFormat::Human => format_duration(result.duration),
        DurationFormat::Nanos => result.duration.as_nanos().to_string(),
    }
}

/// Write the header and one row per result to `writer`
pub fn write_csv_to<W: Write>(
    writer: W,
    results: &[BenchmarkResult],
    format: DurationFormat,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADERS)?;

    for result in results {
        csv_writer.write_record([
            result.driver.clone(),
            result.operation.to_string(),
            result.data_size.to_string(),
            render_duration(result, format),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| SqlBenchError::PersistenceError(format!("Failed to flush CSV: {}", e)))
}

/// Create `path` (truncating it) and write results as CSV
pub fn write_csv(path: &Path, results: &[BenchmarkResult], format: DurationFormat) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        SqlBenchError::PersistenceError(format!(
            "Failed to create CSV file {}: {}",
            path.display(),
            e
        ))
    })?;

    write_csv_to(file, results, format)?;
    log::info!("Wrote {} results to {}", results.len(), path.display());
    Ok(())
}

/// Write the full report as pretty JSON
pub fn write_json(path: &Path, report: &SweepReport) -> Result<()> {
    let results_file = ResultsFile {
        version: RESULTS_FILE_VERSION,
        generated_at: Utc::now(),
        report: report.clone(),
    };

    let content = serde_json::to_string_pretty(&results_file)?;

    fs::write(path, content).map_err(|e| {
        SqlBenchError::PersistenceError(format!(
            "Failed to write results file {}: {}",
            path.display(),
            e
        ))
    })?;

    log::info!("Wrote JSON report to {}", path.display());
    Ok(())
}
