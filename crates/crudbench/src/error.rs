//! Benchmark error types.

use thiserror::Error;

/// Benchmark errors.
///
/// Nothing is retried; the first error aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    /// PostgreSQL driver error.
    #[error("postgres error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// SQLite driver error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// MongoDB driver error.
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Failed to start the Tokio runtime that drives an async client.
    #[error("runtime error: {0}")]
    Runtime(#[source] std::io::Error),

    /// Chart rendering error.
    #[error("chart error: {0}")]
    Chart(String),

    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
