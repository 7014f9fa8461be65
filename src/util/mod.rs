//! Utility functions module
//!
//! Contains helpers for size and duration formatting.

pub mod units;

pub use units::{calculate_ops_per_sec, format_bytes, format_duration, format_latency};
