//! Criterion harness: per-driver write and read latency at each payload size.
//!
//! Benchmarks are registered as `<driver>_Write_<n>Bytes` and
//! `<driver>_Read_<n>Bytes`. Criterion picks the iteration count;
//! `iter_custom` hands it to the runner so only the runner's timed loop is
//! measured, not connection setup.

use criterion::{criterion_group, criterion_main, Criterion};
use sqlbench::bench::{BenchmarkCase, Runner};
use sqlbench::driver::{isolated_memory_dsn, DriverKind};
use sqlbench::models::Operation;
use sqlbench::DEFAULT_DATA_SIZES;
use std::time::Duration;
use tokio::runtime::Runtime;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
}

fn bench_drivers(c: &mut Criterion) {
    let rt = runtime();

    for driver in DriverKind::all() {
        let runner = Runner::new(isolated_memory_dsn("bench"));

        for data_size in DEFAULT_DATA_SIZES {
            for operation in Operation::all() {
                let case = BenchmarkCase {
                    driver,
                    operation,
                    data_size,
                };
                c.bench_function(&case.bench_name(), |b| {
                    b.iter_custom(|iters| {
                        rt.block_on(runner.run(case.driver, case.operation, case.data_size, iters as usize))
                            .expect("benchmark run failed")
                    });
                });
            }
        }
    }
}

criterion_group! {
    name = benches;
    // 1 MiB inserts are slow enough that the default 100 samples take minutes
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(10));
    targets = bench_drivers
}
criterion_main!(benches);
