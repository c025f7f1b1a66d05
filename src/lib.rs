//! This crate benchmarks classic comparison sorts over records loaded from CSV files.
//!
//! A dataset of `id,first_name,last_name` rows is loaded and validated by the
//! [DatasetLoader](loader::DatasetLoader), and copies of it are sorted by one of three
//! instrumented algorithms: bubble sort, insertion sort and merge sort. Every run counts
//! comparisons and record moves in a [ProgressTracker](progress::ProgressTracker), reports
//! batched progress to a [ProgressObserver](progress::ProgressObserver) and can be cancelled
//! cooperatively through a [CancelToken](cancel::CancelToken). All three algorithms are stable.
//!
//! The [Benchmark](benchmark::Benchmark) context ties these together, timing each run and
//! appending the result to a plain text log.
//!
//! # Examples
//! ```
//! use sort_bench::algorithm::Algorithm;
//! use sort_bench::cancel::CancelToken;
//! use sort_bench::progress::ProgressTracker;
//! use sort_bench::record::Record;
//! use sort_bench::sort::{sort, RunOutcome};
//! use sort_bench::sort_key::SortKey;
//!
//! fn main() -> Result<(), anyhow::Error> {
//!     let mut records = vec![
//!         Record::new(3, "Cleo", "Ward")?,
//!         Record::new(1, "Abe", "Young")?,
//!         Record::new(2, "Bea", "Xu")?,
//!     ];
//!     let mut tracker = ProgressTracker::new();
//!     let outcome = sort(Algorithm::Insertion, SortKey::Id, &mut records, &mut tracker, &CancelToken::new());
//!     assert_eq!(outcome, RunOutcome::Completed);
//!     assert_eq!(records[0].first_name(), "Abe");
//!     assert_eq!(tracker.comparisons(), 3);
//!     Ok(())
//! }
//! ```
//!

pub(crate) mod key;

pub mod algorithm;
pub mod bench_log;
pub mod benchmark;
pub mod cancel;
pub mod config;
pub mod generator;
pub mod loader;
pub mod progress;
pub mod record;
pub mod sort;
pub mod sort_key;
