//! End-to-end scenarios: runner output flows through the CSV writer.

use rusqlite::{Connection, OpenFlags};
use sqlbench::bench::{run_read, run_write, Runner, Sweep};
use sqlbench::config::persistence::write_csv;
use sqlbench::config::{BenchmarkConfig, DurationFormat};
use sqlbench::driver::{isolated_memory_dsn, DriverKind};
use sqlbench::models::{BenchmarkResult, Operation};
use sqlbench::util::format_duration;
use sqlbench::DEFAULT_ITERATIONS;
use tempfile::TempDir;

fn observer(dsn: &str) -> Connection {
    Connection::open_with_flags(
        dsn,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE | OpenFlags::SQLITE_OPEN_URI,
    )
    .expect("open observer")
}

#[tokio::test]
async fn single_write_result_to_csv() {
    let runner = Runner::new(isolated_memory_dsn("e2e-single"));
    let duration = runner
        .write(DriverKind::Rusqlite, 64, DEFAULT_ITERATIONS)
        .await
        .expect("write run");

    let result = BenchmarkResult::new(
        DriverKind::Rusqlite.label(),
        Operation::Write,
        64,
        duration,
        DEFAULT_ITERATIONS as u64,
    );

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("benchmark_results.csv");
    write_csv(&path, &[result], DurationFormat::Human).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "Driver,Operation,DataSize,Duration");
    assert_eq!(lines[1], format!("rusqlite,write,64,{}", format_duration(duration)));
}

#[tokio::test]
async fn write_run_leaves_exactly_n_rows() {
    // A second connection keeps the shared in-memory database alive after
    // the runner closes its own.
    for driver in DriverKind::all() {
        let dsn = isolated_memory_dsn("e2e-rows");
        let watcher = observer(&dsn);

        Runner::new(dsn.as_str()).write(driver, 256, 42).await.unwrap();

        let count: i64 = watcher
            .query_row("SELECT COUNT(*) FROM test", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 42, "driver {}", driver);
    }
}

#[tokio::test]
async fn full_sweep_to_csv() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("benchmark_results.csv");

    let config = BenchmarkConfig::new()
        .with_data_sizes(vec![64, 4096])
        .with_iterations(10)
        .with_seed_rows(10)
        .with_connection_string(isolated_memory_dsn("e2e-sweep"))
        .with_csv_path(&path);

    let report = Sweep::new(config.clone()).unwrap().run(None).await.unwrap();
    assert_eq!(report.results.len(), 8);

    write_csv(&path, &report.results, DurationFormat::Nanos).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), report.results.len() + 1);

    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields.len(), 4);
        assert!(fields[0] == "rusqlite" || fields[0] == "sqlx");
        assert!(fields[1] == "write" || fields[1] == "read");
        assert!(fields[2] == "64" || fields[2] == "4096");
        fields[3].parse::<u128>().expect("nanosecond duration");
    }
}

#[tokio::test]
async fn reference_workload_on_default_connection_string() {
    // Only test in this binary that touches the default shared database
    for driver in DriverKind::all() {
        run_write(driver, 64).await.unwrap();
        run_read(driver, 64).await.unwrap();
    }
}
