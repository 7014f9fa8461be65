//! Report module: renders a side-by-side driver comparison of sweep results.

use crate::models::{BenchmarkResult, Operation};
use crate::util::units::{format_bytes, format_duration, format_latency};

/// Render the comparison table as a string.
///
/// One row per (data size, operation) in first-seen order, one column per
/// driver with the total time and per-statement cost. The last column names
/// the driver with the lowest total time.
pub fn render_summary(results: &[BenchmarkResult]) -> String {
    let mut drivers: Vec<&str> = Vec::new();
    let mut rows: Vec<(u64, Operation)> = Vec::new();
    for r in results {
        if !drivers.contains(&r.driver.as_str()) {
            drivers.push(&r.driver);
        }
        if !rows.contains(&(r.data_size, r.operation)) {
            rows.push((r.data_size, r.operation));
        }
    }

    let width = 22 + drivers.len() * 36 + 10;
    let mut out = format!("\n{}\n", "=".repeat(width));
    out.push_str("  SQLite Driver Latency Report\n");
    out.push_str(&format!("{}\n", "=".repeat(width)));

    out.push_str(&format!("  {:10} {:>9}", "Size", "Op"));
    for driver in &drivers {
        out.push_str(&format!(" {:>35}", driver));
    }
    out.push_str(&format!(" {:>9}\n", "Fastest"));
    out.push_str(&format!("  {}\n", "-".repeat(width - 2)));

    for (data_size, operation) in rows {
        out.push_str(&format!("  {:10} {:>9}", format_bytes(data_size), operation));

        let mut fastest: Option<&BenchmarkResult> = None;
        for driver in &drivers {
            let cell = results.iter().find(|r| {
                r.driver == *driver && r.data_size == data_size && r.operation == operation
            });
            match cell {
                Some(r) => {
                    let text = format!(
                        "{} ({}/op, {:.0} op/s)",
                        format_duration(r.duration),
                        format_latency(r.per_operation()),
                        r.ops_per_second()
                    );
                    out.push_str(&format!(" {:>35}", text));
                    if fastest.map_or(true, |f| r.duration < f.duration) {
                        fastest = Some(r);
                    }
                }
                None => out.push_str(&format!(" {:>35}", "-")),
            }
        }

        out.push_str(&format!(" {:>9}\n", fastest.map_or("-", |f| f.driver.as_str())));
    }

    out.push_str(&format!("{}\n", "=".repeat(width)));
    out
}

/// Print the comparison table to stdout
pub fn print_summary(results: &[BenchmarkResult]) {
    println!("{}", render_summary(results));
}
