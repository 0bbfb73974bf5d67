//! Output formatters for result tables.

use clap::ValueEnum;
use comfy_table::{Cell, CellAlignment, Table};

use crate::error::Result;
use crate::suite::ResultTable;

/// Column headers shared by the table and CSV formats.
const HEADERS: [&str; 4] = ["Database", "Records", "Operation", "Time (s)"];

/// Output format for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// ASCII table format
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Render `results` in the requested format.
pub fn render(results: &ResultTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(results)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
        OutputFormat::Csv => Ok(render_csv(results)),
    }
}

fn render_table(results: &ResultTable) -> String {
    if results.is_empty() {
        return "No results".to_string();
    }

    let mut table = Table::new();
    // leading index column, like a data-frame dump
    table.set_header(std::iter::once("").chain(HEADERS).collect::<Vec<_>>());

    for (index, row) in results.rows().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(&row.database),
            Cell::new(row.records).set_alignment(CellAlignment::Right),
            Cell::new(row.operation),
            Cell::new(format!("{:.6}", row.seconds)).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

fn render_csv(results: &ResultTable) -> String {
    let mut output = HEADERS.join(",");
    output.push('\n');

    for row in results.rows() {
        output.push_str(&format!(
            "\"{}\",{},{},{}\n",
            escape_csv(&row.database),
            row.records,
            row.operation,
            row.seconds
        ));
    }

    output
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    s.replace('"', "\"\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suite::{Operation, ResultRow};

    fn sample() -> ResultTable {
        vec![
            ResultRow {
                database: "PostgreSQL".to_string(),
                records: 1_000,
                operation: Operation::Insert,
                seconds: 0.25,
            },
            ResultRow {
                database: "MongoDB".to_string(),
                records: 1_000,
                operation: Operation::Select,
                seconds: 0.125,
            },
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_table_contains_rows() {
        let output = render(&sample(), OutputFormat::Table).unwrap();
        assert!(output.contains("Database"));
        assert!(output.contains("Time (s)"));
        assert!(output.contains("PostgreSQL"));
        assert!(output.contains("MongoDB"));
        assert!(output.contains("0.250000"));
    }

    #[test]
    fn test_table_empty() {
        let output = render(&ResultTable::new(), OutputFormat::Table).unwrap();
        assert_eq!(output, "No results");
    }

    #[test]
    fn test_json_roundtrip() {
        let table = sample();
        let output = render(&table, OutputFormat::Json).unwrap();
        let parsed: ResultTable = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed, table);
        assert!(output.contains("\"operation\": \"Insert\""));
    }

    #[test]
    fn test_csv_layout() {
        let output = render(&sample(), OutputFormat::Csv).unwrap();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "Database,Records,Operation,Time (s)");
        assert_eq!(lines[1], "\"PostgreSQL\",1000,Insert,0.25");
        assert_eq!(lines[2], "\"MongoDB\",1000,Select,0.125");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("hello"), "hello");
        assert_eq!(escape_csv("say \"hi\""), "say \"\"hi\"\"");
    }
}
