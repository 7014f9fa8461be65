//! Console front-end: runs a sweep with a progress bar and writes results.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;

use crate::bench::sweep::{Sweep, SweepProgress, SweepReport};
use crate::config::persistence::{write_csv, write_json};
use crate::config::BenchmarkConfig;
use crate::report::print_summary;
use crate::Result;

/// Load configuration from `path`, or from the standard location when absent
pub fn load_config(path: Option<&Path>) -> Result<BenchmarkConfig> {
    match path {
        Some(path) => BenchmarkConfig::load_from(path),
        None => BenchmarkConfig::load(),
    }
}

/// Run the sweep and stream progress to a progress bar.
pub async fn run_sweep(config: BenchmarkConfig) -> Result<SweepReport> {
    let sweep = Sweep::new(config)?;
    let total = sweep.cases().len() as u64;
    let (tx, mut rx) = mpsc::channel::<SweepProgress>(100);

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let handle = tokio::spawn(async move {
        while let Some(update) = rx.recv().await {
            pb.set_position(update.completed as u64);
            pb.set_message(update.case.to_string());
        }
        pb.finish_and_clear();
    });

    let report = sweep.run(Some(tx)).await;
    if let Err(err) = handle.await {
        log::warn!("Progress reporter stopped: {}", err);
    }
    report
}

/// Write the CSV and, when configured, the JSON export
pub fn save_report(config: &BenchmarkConfig, report: &SweepReport) -> Result<()> {
    write_csv(
        &config.output.csv_path,
        &report.results,
        config.output.duration_format,
    )?;

    if let Some(json_path) = &config.output.json_path {
        write_json(json_path, report)?;
    }

    Ok(())
}

/// Full command-line flow. Returns `Ok(false)` when some cases failed under
/// the skip policy, so the caller can exit non-zero.
pub async fn run(config_path: Option<&Path>) -> Result<bool> {
    let config = load_config(config_path)?;
    let report = run_sweep(config.clone()).await?;

    save_report(&config, &report)?;
    print_summary(&report.results);

    if !report.is_complete() {
        log::error!(
            "{} of {} cases failed",
            report.failures.len(),
            report.failures.len() + report.results.len()
        );
        for failure in &report.failures {
            log::error!("  {}: {}", failure.case, failure.error);
        }
    }

    Ok(report.is_complete())
}
