//! PostgreSQL backend for comparison benchmarks.
//!
//! Requires a running PostgreSQL instance. The connection URL comes from
//! [`BenchConfig`](crate::config::BenchConfig), which honours `DATABASE_URL`.

use sqlx::{postgres::PgPoolOptions, PgPool, Row};
use tokio::runtime::Runtime;

use crate::error::{Error, Result};
use crate::fixtures::Record;

use super::{Backend, SQL_LIKE_PATTERN, TABLE_NAME};

/// PostgreSQL backend for benchmarks.
///
/// Owns a single-connection pool and the runtime that drives it, so every
/// call blocks until the server answers.
pub struct PostgresBackend {
    pool: PgPool,
    rt: Runtime,
}

impl PostgresBackend {
    /// Connect and make sure the benchmark table exists.
    pub fn connect(database_url: &str) -> Result<Self> {
        let rt = Runtime::new().map_err(Error::Runtime)?;

        let pool = rt.block_on(async {
            PgPoolOptions::new()
                .max_connections(1)
                .connect(database_url)
                .await
        })?;

        let create = format!(
            "CREATE TABLE IF NOT EXISTS {TABLE_NAME} (id BIGINT NOT NULL, value TEXT NOT NULL)"
        );
        rt.block_on(async { sqlx::query(&create).execute(&pool).await })?;
        tracing::debug!(table = TABLE_NAME, "postgres table ready");

        Ok(Self { pool, rt })
    }
}

impl Backend for PostgresBackend {
    fn name(&self) -> &str {
        "PostgreSQL"
    }

    fn pattern(&self) -> &str {
        SQL_LIKE_PATTERN
    }

    /// One INSERT per record inside a single transaction.
    fn insert(&mut self, records: &[Record]) -> Result<()> {
        let sql = format!("INSERT INTO {TABLE_NAME} (id, value) VALUES ($1, $2)");
        self.rt.block_on(async {
            let mut tx = self.pool.begin().await?;

            for record in records {
                sqlx::query(&sql)
                    .bind(record.id)
                    .bind(&record.value)
                    .execute(&mut *tx)
                    .await?;
            }

            tx.commit().await
        })?;
        Ok(())
    }

    fn select(&mut self, pattern: &str) -> Result<Vec<Record>> {
        let sql = format!("SELECT id, value FROM {TABLE_NAME} WHERE value LIKE $1");
        let rows = self.rt.block_on(async {
            sqlx::query(&sql)
                .bind(pattern)
                .fetch_all(&self.pool)
                .await
        })?;

        rows.into_iter()
            .map(|row| {
                Ok(Record {
                    id: row.try_get("id")?,
                    value: row.try_get("value")?,
                })
            })
            .collect()
    }

    fn delete(&mut self, pattern: &str) -> Result<u64> {
        let sql = format!("DELETE FROM {TABLE_NAME} WHERE value LIKE $1");
        let result = self.rt.block_on(async {
            sqlx::query(&sql)
                .bind(pattern)
                .execute(&self.pool)
                .await
        })?;
        Ok(result.rows_affected())
    }
}

impl Drop for PostgresBackend {
    fn drop(&mut self) {
        self.rt.block_on(self.pool.close());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DEFAULT_POSTGRES_URL, POSTGRES_URL_ENV};
    use crate::fixtures::generate_records;

    /// Connect to the server named by DATABASE_URL with an empty table.
    fn live_backend() -> PostgresBackend {
        let url =
            std::env::var(POSTGRES_URL_ENV).unwrap_or_else(|_| DEFAULT_POSTGRES_URL.to_string());
        let mut backend = PostgresBackend::connect(&url).unwrap();
        backend.delete("%").unwrap();
        backend
    }

    #[test]
    #[ignore = "requires a running PostgreSQL server (DATABASE_URL)"]
    fn test_live_insert_select_delete() {
        let mut backend = live_backend();

        // empty batch is a no-op
        backend.insert(&[]).unwrap();
        assert!(backend.select("%").unwrap().is_empty());

        backend.insert(&generate_records(30)).unwrap();

        let mut ids: Vec<_> = backend
            .select(SQL_LIKE_PATTERN)
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![2, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29]);

        assert_eq!(backend.delete(SQL_LIKE_PATTERN).unwrap(), 11);
        assert_eq!(backend.delete(SQL_LIKE_PATTERN).unwrap(), 0);
        assert_eq!(backend.delete("%").unwrap(), 19);
    }
}
