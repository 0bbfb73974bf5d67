//! SQLite backend for comparison benchmarks.
//!
//! Same table shape and `LIKE` pattern as the PostgreSQL backend, but
//! embedded, so it runs without a database server.

use std::path::Path;

use rusqlite::{params, Connection};

use crate::error::Result;
use crate::fixtures::Record;

use super::{Backend, SQL_LIKE_PATTERN, TABLE_NAME};

/// SQLite backend for benchmarks.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Create a new in-memory SQLite database.
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Open (or create) a file-backed SQLite database.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (
                id INTEGER NOT NULL,
                value TEXT NOT NULL
            );"
        ))?;
        Ok(Self { conn })
    }

    /// Number of rows currently stored, matching or not.
    pub fn count(&self) -> Result<u64> {
        let count: i64 =
            self.conn
                .query_row(&format!("SELECT COUNT(*) FROM {TABLE_NAME}"), [], |row| {
                    row.get(0)
                })?;
        Ok(count as u64)
    }
}

impl Backend for SqliteBackend {
    fn name(&self) -> &str {
        "SQLite"
    }

    fn pattern(&self) -> &str {
        SQL_LIKE_PATTERN
    }

    fn insert(&mut self, records: &[Record]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt =
                tx.prepare(&format!("INSERT INTO {TABLE_NAME} (id, value) VALUES (?1, ?2)"))?;
            for record in records {
                stmt.execute(params![record.id, &record.value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn select(&mut self, pattern: &str) -> Result<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT id, value FROM {TABLE_NAME} WHERE value LIKE ?1"))?;
        let rows = stmt
            .query_map(params![pattern], |row| {
                Ok(Record {
                    id: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn delete(&mut self, pattern: &str) -> Result<u64> {
        let deleted = self.conn.execute(
            &format!("DELETE FROM {TABLE_NAME} WHERE value LIKE ?1"),
            params![pattern],
        )?;
        Ok(deleted as u64)
    }
}
