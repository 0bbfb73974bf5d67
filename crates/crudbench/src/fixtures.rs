//! Test data generation for benchmarks.
//!
//! Records are fully deterministic so every backend sees the same data set.

use serde::{Deserialize, Serialize};

/// Prefix of every generated record value.
pub const VALUE_PREFIX: &str = "data_";

/// Synthetic record inserted into every backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub value: String,
}

impl Record {
    /// Build the record for a given identifier.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            value: format!("{VALUE_PREFIX}{id}"),
        }
    }
}

/// Generate `count` records with identifiers `0..count`.
pub fn generate_records(count: usize) -> Vec<Record> {
    (0..count as i64).map(Record::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_records() {
        let records = generate_records(5);
        let ids: Vec<_> = records.iter().map(|r| r.id).collect();
        let values: Vec<_> = records.iter().map(|r| r.value.as_str()).collect();

        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
        assert_eq!(values, vec!["data_0", "data_1", "data_2", "data_3", "data_4"]);
    }

    #[test]
    fn test_generate_empty() {
        assert!(generate_records(0).is_empty());
    }

    #[test]
    fn test_ids_unique_and_dense() {
        for count in [1, 7, 100, 2_500] {
            let records = generate_records(count);
            assert_eq!(records.len(), count);

            let ids: HashSet<_> = records.iter().map(|r| r.id).collect();
            assert_eq!(ids.len(), count);
            assert!(records.iter().enumerate().all(|(i, r)| r.id == i as i64));
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(generate_records(50), generate_records(50));
    }
}
