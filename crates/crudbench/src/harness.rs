//! Benchmark harness helpers.
//!
//! [`measure`] times a single call; [`run_benchmark`] drives one backend
//! through the insert/select/delete sequence for a given record count.

use std::time::{Duration, Instant};

use crate::backends::Backend;
use crate::error::Result;
use crate::fixtures::generate_records;

/// Output of a timed call.
#[derive(Debug, Clone, Copy)]
pub struct Timed<T> {
    pub value: T,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    /// Elapsed wall-clock time in seconds.
    pub fn secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

/// Run `op` once and measure its wall-clock duration.
///
/// Errors are passed through untouched; no time is reported for a failed call.
pub fn measure<T, E>(
    op: impl FnOnce() -> std::result::Result<T, E>,
) -> std::result::Result<Timed<T>, E> {
    let start = Instant::now();
    let value = op()?;
    let elapsed = start.elapsed();
    Ok(Timed { value, elapsed })
}

/// Durations of one benchmark step against a single backend.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkTimings {
    pub insert: Duration,
    pub select: Duration,
    pub delete: Duration,
    /// Records returned by the timed select.
    pub selected: usize,
    /// Records removed by the timed delete.
    pub deleted: u64,
}

/// Benchmark one backend at one record count.
///
/// Matching leftovers from earlier runs are deleted first (untimed), then
/// insert, select and delete are timed in that order using the backend's own
/// pattern. The first failure aborts the step.
pub fn run_benchmark(backend: &mut dyn Backend, record_count: usize) -> Result<BenchmarkTimings> {
    let records = generate_records(record_count);
    let pattern = backend.pattern().to_string();

    let cleared = backend.delete(&pattern)?;
    tracing::debug!(backend = backend.name(), cleared, "cleared matching records");

    let insert = measure(|| backend.insert(&records))?;
    let select = measure(|| backend.select(&pattern))?;
    let delete = measure(|| backend.delete(&pattern))?;

    let timings = BenchmarkTimings {
        insert: insert.elapsed,
        select: select.elapsed,
        delete: delete.elapsed,
        selected: select.value.len(),
        deleted: delete.value,
    };

    tracing::info!(
        backend = backend.name(),
        records = record_count,
        insert_secs = timings.insert.as_secs_f64(),
        select_secs = timings.select.as_secs_f64(),
        delete_secs = timings.delete.as_secs_f64(),
        selected = timings.selected,
        deleted = timings.deleted,
        "benchmark step complete"
    );

    Ok(timings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::SqliteBackend;
    use crate::error::Error;

    #[test]
    fn test_measure_noop() {
        let timed = measure(|| Ok::<_, Error>(())).unwrap();
        assert!(timed.secs() >= 0.0);
        assert!(timed.elapsed < Duration::from_millis(50));
    }

    #[test]
    fn test_measure_sleep() {
        let timed = measure(|| {
            std::thread::sleep(Duration::from_millis(20));
            Ok::<_, Error>(7)
        })
        .unwrap();
        assert_eq!(timed.value, 7);
        assert!(timed.elapsed >= Duration::from_millis(20));
    }

    #[test]
    fn test_measure_propagates_error() {
        let result = measure(|| Err::<(), _>(Error::Config("boom".into())));
        assert!(matches!(result, Err(Error::Config(msg)) if msg == "boom"));
    }

    #[test]
    fn test_run_benchmark_sqlite() {
        let mut backend = SqliteBackend::open_in_memory().unwrap();
        let timings = run_benchmark(&mut backend, 30).unwrap();

        // data_2, data_20..data_29
        assert_eq!(timings.selected, 11);
        assert_eq!(timings.deleted, 11);
        assert_eq!(backend.count().unwrap(), 19);

        for elapsed in [timings.insert, timings.select, timings.delete] {
            assert!(elapsed.as_secs_f64() >= 0.0);
        }
    }

    #[test]
    fn test_run_benchmark_clears_previous_matches() {
        let mut backend = SqliteBackend::open_in_memory().unwrap();
        backend.insert(&generate_records(5)).unwrap();

        let timings = run_benchmark(&mut backend, 5).unwrap();
        assert_eq!(timings.selected, 1);
        assert_eq!(timings.deleted, 1);
        // Non-matching rows from both inserts remain
        assert_eq!(backend.count().unwrap(), 8);
    }

    #[test]
    fn test_run_benchmark_zero_records() {
        let mut backend = SqliteBackend::open_in_memory().unwrap();
        let timings = run_benchmark(&mut backend, 0).unwrap();
        assert_eq!(timings.selected, 0);
        assert_eq!(timings.deleted, 0);
    }
}
