use sqlbench::error::{is_case_local, user_friendly_message};
use sqlbench::SqlBenchError;
use std::error::Error;

#[test]
fn test_user_friendly_messages() {
    let msg = user_friendly_message(&SqlBenchError::ConnectionError("bad uri".into()));
    assert!(msg.contains("bad uri"));
    assert!(msg.contains("connection string"));

    let msg = user_friendly_message(&SqlBenchError::PersistenceError("x".into()));
    assert!(msg.contains("Failed to save results"));

    let msg = user_friendly_message(&SqlBenchError::InsertError("disk full".into()));
    assert_eq!(msg, "Failed to insert data: disk full");
}

#[test]
fn test_case_local_errors() {
    assert!(is_case_local(&SqlBenchError::QueryError("x".into())));
    assert!(is_case_local(&SqlBenchError::SchemaError("x".into())));
    assert!(!is_case_local(&SqlBenchError::ConfigError("x".into())));
    assert!(!is_case_local(&SqlBenchError::PersistenceError("x".into())));
}

#[test]
fn test_io_error_source_is_kept() {
    let err: SqlBenchError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
    assert!(err.source().is_some());
    assert!(err.to_string().starts_with("I/O error"));
}
