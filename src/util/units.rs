//! Units formatting and conversion utilities
//!
//! Provides human-readable formatting of payload sizes and durations plus
//! the statement rate shown in result summaries.

use std::time::Duration;

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Format bytes into human-readable size with binary units
///
/// # Examples
/// ```
/// use sqlbench::util::units::format_bytes;
///
/// assert_eq!(format_bytes(64), "64 B");
/// assert_eq!(format_bytes(4096), "4 KiB");
/// assert_eq!(format_bytes(1536), "1.5 KiB");
/// ```
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];

    let mut unit_index = 0;
    let mut divisor = 1u64;
    while unit_index < UNITS.len() - 1 && bytes / divisor >= 1024 {
        divisor *= 1024;
        unit_index += 1;
    }

    if bytes % divisor == 0 {
        format!("{} {}", bytes / divisor, UNITS[unit_index])
    } else {
        format!("{:.1} {}", bytes as f64 / divisor as f64, UNITS[unit_index])
    }
}

/// Format a duration using the largest unit that keeps the value at or
/// above one, with trailing zero decimals dropped (`1.234567ms`, `850µs`,
/// `2.5s`, `1m30s`).
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use sqlbench::util::units::format_duration;
///
/// assert_eq!(format_duration(Duration::from_micros(1500)), "1.5ms");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos == 0 {
        "0s".to_string()
    } else if nanos < NANOS_PER_MICRO {
        format!("{}ns", nanos)
    } else if nanos < NANOS_PER_MILLI {
        format!("{}µs", decimal(nanos, NANOS_PER_MICRO))
    } else if nanos < NANOS_PER_SEC {
        format!("{}ms", decimal(nanos, NANOS_PER_MILLI))
    } else {
        let total_secs = duration.as_secs();
        let hours = total_secs / 3600;
        let minutes = (total_secs % 3600) / 60;
        let secs = decimal(nanos % (60 * NANOS_PER_SEC), NANOS_PER_SEC);

        if hours > 0 {
            format!("{}h{}m{}s", hours, minutes, secs)
        } else if minutes > 0 {
            format!("{}m{}s", minutes, secs)
        } else {
            format!("{}s", secs)
        }
    }
}

/// `value / unit` rendered with only the significant fractional digits
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }

    let width = unit.to_string().len() - 1;
    let digits = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

/// Calculate statements executed per second
pub fn calculate_ops_per_sec(operations: u64, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 0.0;
    }

    operations as f64 / duration.as_secs_f64()
}

/// Format per-statement latency with two decimals
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use sqlbench::util::units::format_latency;
///
/// assert_eq!(format_latency(Duration::from_millis(5)), "5.00ms");
/// assert_eq!(format_latency(Duration::from_nanos(12_340)), "12.34µs");
/// ```
pub fn format_latency(duration: Duration) -> String {
    let nanos = duration.as_nanos();

    if nanos >= NANOS_PER_MILLI {
        format!("{:.2}ms", nanos as f64 / NANOS_PER_MILLI as f64)
    } else {
        format!("{:.2}µs", nanos as f64 / NANOS_PER_MICRO as f64)
    }
}
