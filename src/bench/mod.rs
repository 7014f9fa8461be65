//! Benchmark engine module
//!
//! Contains payload generation, the timed write/read runners and the
//! driver x size sweep.

pub mod runner;
pub mod sweep;
pub mod workload;

// Re-export commonly used types
pub use runner::{run_read, run_write, Runner};
pub use sweep::{BenchmarkCase, CaseFailure, Sweep, SweepProgress, SweepReport};
pub use workload::{generate_payload, PayloadFill};
