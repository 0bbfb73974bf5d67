//! crudbench - relational vs. document database latency comparison
//!
//! Times insert, select and delete of a synthetic record set against each
//! configured backend, at several record counts, and collects the durations
//! into a flat result table that can be printed or charted.
//!
//! # Modules
//!
//! - **fixtures**: synthetic record generation
//! - **backends**: PostgreSQL, SQLite and MongoDB behind one [`Backend`] trait
//! - **harness**: wall-clock timer and the per-backend benchmark driver
//! - **suite**: record-count x backend iteration and the result table
//! - **report**: table / JSON / CSV rendering of results
//! - **plots**: SVG line charts, one per operation

pub mod backends;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod harness;
pub mod plots;
pub mod report;
pub mod suite;

pub use backends::{Backend, BackendKind, MongoBackend, PostgresBackend, SqliteBackend};
pub use config::{Args, BenchConfig};
pub use error::{Error, Result};
pub use fixtures::{generate_records, Record};
pub use harness::{measure, run_benchmark, BenchmarkTimings, Timed};
pub use report::OutputFormat;
pub use suite::{run_suite, Operation, ResultRow, ResultTable};
