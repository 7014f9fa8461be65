//! Data models module
//!
//! Contains the benchmark result record and operation kinds.

pub mod result;

pub use result::{BenchmarkResult, Operation};
