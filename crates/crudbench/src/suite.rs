//! Suite runner and result table.

use serde::{Deserialize, Serialize};

use crate::backends::Backend;
use crate::error::Result;
use crate::harness::run_benchmark;

/// Timed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    Insert,
    Select,
    Delete,
}

impl Operation {
    /// All operations in the order they are timed.
    pub const ALL: [Operation; 3] = [Operation::Insert, Operation::Select, Operation::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Insert => "Insert",
            Operation::Select => "Select",
            Operation::Delete => "Delete",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One (backend, record count, operation) measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub database: String,
    pub records: usize,
    pub operation: Operation,
    /// Wall-clock duration in seconds.
    pub seconds: f64,
}

/// Ordered collection of result rows from one suite run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, row: ResultRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows for a single operation, in insertion order.
    pub fn by_operation(&self, operation: Operation) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter().filter(move |r| r.operation == operation)
    }

    /// Backend names in order of first appearance.
    pub fn databases(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !names.contains(&row.database.as_str()) {
                names.push(&row.database);
            }
        }
        names
    }

    /// `(record count, seconds)` points per backend for one operation,
    /// sorted by record count.
    pub fn series(&self, operation: Operation) -> Vec<(&str, Vec<(usize, f64)>)> {
        self.databases()
            .into_iter()
            .map(|name| {
                let mut points: Vec<_> = self
                    .by_operation(operation)
                    .filter(|r| r.database == name)
                    .map(|r| (r.records, r.seconds))
                    .collect();
                points.sort_by_key(|&(records, _)| records);
                (name, points)
            })
            .filter(|(_, points)| !points.is_empty())
            .collect()
    }
}

impl FromIterator<ResultRow> for ResultTable {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// Run every backend at every record count.
///
/// Record counts form the outer loop so all backends are measured at one size
/// before moving to the next. Each step appends Insert, Select and Delete rows.
pub fn run_suite(
    backends: &mut [Box<dyn Backend>],
    record_counts: &[usize],
) -> Result<ResultTable> {
    let mut table = ResultTable::new();

    for &records in record_counts {
        for backend in backends.iter_mut() {
            tracing::info!(backend = backend.name(), records, "running benchmark");
            let timings = run_benchmark(&mut **backend, records)?;
            let database = backend.name().to_string();

            for (operation, elapsed) in [
                (Operation::Insert, timings.insert),
                (Operation::Select, timings.select),
                (Operation::Delete, timings.delete),
            ] {
                table.push(ResultRow {
                    database: database.clone(),
                    records,
                    operation,
                    seconds: elapsed.as_secs_f64(),
                });
            }
        }
    }

    tracing::info!(rows = table.len(), "suite complete");
    Ok(table)
}
