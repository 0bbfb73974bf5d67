//! Database backends for comparison benchmarks.
//!
//! Every backend exposes the same insert/select/delete contract so the
//! benchmark driver is written once. Each one matches records with its own
//! native pattern syntax; the patterns are not equivalent across backends.

pub mod mongo;
pub mod postgres;
pub mod sqlite;

pub use mongo::MongoBackend;
pub use postgres::PostgresBackend;
pub use sqlite::SqliteBackend;

use clap::ValueEnum;

use crate::config::BenchConfig;
use crate::error::Result;
use crate::fixtures::Record;

/// SQL `LIKE` pattern used by the relational backends.
pub const SQL_LIKE_PATTERN: &str = "data_2%";

/// `$regex` pattern used by the document backend.
pub const MONGO_REGEX_PATTERN: &str = "^data_2";

/// Table created by the relational backends.
pub const TABLE_NAME: &str = "test_table";

/// Uniform operation set over one database connection.
pub trait Backend {
    /// Display name, used as the series label in results.
    fn name(&self) -> &str;

    /// Native match expression this backend benchmarks select/delete with.
    fn pattern(&self) -> &str;

    /// Insert all records.
    fn insert(&mut self, records: &[Record]) -> Result<()>;

    /// Return every record whose value matches `pattern`.
    fn select(&mut self, pattern: &str) -> Result<Vec<Record>>;

    /// Remove every record whose value matches `pattern`, returning the count.
    fn delete(&mut self, pattern: &str) -> Result<u64>;
}

/// Backend selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum BackendKind {
    /// PostgreSQL over the network.
    Postgres,
    /// Embedded SQLite.
    Sqlite,
    /// MongoDB over the network.
    #[value(name = "mongodb")]
    MongoDb,
}

impl BackendKind {
    /// Open a connection for this backend using `config`.
    ///
    /// The returned backend owns its connection and releases it on drop.
    pub fn open(self, config: &BenchConfig) -> Result<Box<dyn Backend>> {
        tracing::info!(backend = %self, "opening backend");
        let backend: Box<dyn Backend> = match self {
            BackendKind::Postgres => Box::new(PostgresBackend::connect(&config.postgres_url)?),
            BackendKind::Sqlite => match &config.sqlite_path {
                Some(path) => Box::new(SqliteBackend::open(path)?),
                None => Box::new(SqliteBackend::open_in_memory()?),
            },
            BackendKind::MongoDb => Box::new(MongoBackend::connect(
                &config.mongo_url,
                &config.mongo_database,
                &config.mongo_collection,
            )?),
        };
        Ok(backend)
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Postgres => write!(f, "postgres"),
            BackendKind::Sqlite => write!(f, "sqlite"),
            BackendKind::MongoDb => write!(f, "mongodb"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_sqlite_in_memory() {
        let config = BenchConfig::default().with_backends(vec![BackendKind::Sqlite]);
        let backend = BackendKind::Sqlite.open(&config).unwrap();
        assert_eq!(backend.name(), "SQLite");
        assert_eq!(backend.pattern(), SQL_LIKE_PATTERN);
    }

    #[test]
    fn test_kind_display_matches_cli_name() {
        for kind in BackendKind::value_variants() {
            let value = kind.to_possible_value().unwrap();
            assert_eq!(value.get_name(), kind.to_string());
        }
    }
}
