use std::fmt::{Display, Formatter};
use std::time::{Duration, Instant};

use anyhow::anyhow;

use crate::algorithm::Algorithm;
use crate::bench_log;
use crate::cancel::CancelToken;
use crate::config::Config;
use crate::loader::{DatasetLoader, LoadReport};
use crate::progress::{ProgressObserver, ProgressTracker};
use crate::record::Record;
use crate::sort::{RunOutcome, Sorter};
use crate::sort_key::SortKey;

/// Measurements of one sort run. Immutable once created.
#[derive(Clone, Debug, PartialEq)]
pub struct BenchmarkResult {
    algorithm: Algorithm,
    column: SortKey,
    record_count: usize,
    load_time: Duration,
    sort_time: Duration,
    comparisons: u64,
    swaps: u64,
    completed: bool,
}

impl BenchmarkResult {
    pub fn new(
        algorithm: Algorithm,
        column: SortKey,
        record_count: usize,
        load_time: Duration,
        sort_time: Duration,
        comparisons: u64,
        swaps: u64,
        completed: bool,
    ) -> BenchmarkResult {
        BenchmarkResult {
            algorithm,
            column,
            record_count,
            load_time,
            sort_time,
            comparisons,
            swaps,
            completed,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn column(&self) -> SortKey {
        self.column
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    /// Time spent copying the records out of the loaded dataset
    pub fn load_time(&self) -> Duration {
        self.load_time
    }

    pub fn sort_time(&self) -> Duration {
        self.sort_time
    }

    pub fn total_time(&self) -> Duration {
        self.load_time + self.sort_time
    }

    pub fn comparisons(&self) -> u64 {
        self.comparisons
    }

    pub fn swaps(&self) -> u64 {
        self.swaps
    }

    pub fn completed(&self) -> bool {
        self.completed
    }
}

impl Display for BenchmarkResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<15} {:<11} {:>8} {:>11.6}s {:>11.6}s {:>14} {:>12} {}",
            self.algorithm.name(),
            self.column.name(),
            self.record_count,
            self.load_time.as_secs_f64(),
            self.sort_time.as_secs_f64(),
            self.comparisons,
            self.swaps,
            if self.completed { "Completed" } else { "Cancelled" },
        )
    }
}

/// Benchmark context: configuration, loaded dataset and run history.
///
/// Every run sorts its own copy of the loaded records, so runs never see each other's output.
/// Each result is appended to the history and to the log file named by the [Config].
///
/// # Examples
/// ```
/// use sort_bench::benchmark::Benchmark;
/// use sort_bench::cancel::CancelToken;
/// use sort_bench::config::Config;
/// use sort_bench::progress::LogProgress;
/// use sort_bench::sort_key::SortKey;
///
/// fn compare_all(config: Config) -> Result<(), anyhow::Error> {
///     let mut benchmark = Benchmark::new(config);
///     benchmark.load(&mut LogProgress)?;
///     for result in benchmark.run_comparison(SortKey::FirstName, 1000, &CancelToken::new(), &mut LogProgress)? {
///         println!("{result}");
///     }
///     Ok(())
/// }
/// ```
pub struct Benchmark {
    config: Config,
    loader: DatasetLoader,
    file_load_time: Option<Duration>,
    history: Vec<BenchmarkResult>,
}

impl Benchmark {
    pub fn new(config: Config) -> Benchmark {
        let loader = DatasetLoader::new(config.max_records());
        Benchmark {
            config,
            loader,
            file_load_time: None,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn loader(&self) -> &DatasetLoader {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut DatasetLoader {
        &mut self.loader
    }

    /// Results in the order they were produced
    pub fn history(&self) -> &[BenchmarkResult] {
        &self.history
    }

    /// Time spent reading the CSV file by the last successful [Benchmark::load]
    pub fn file_load_time(&self) -> Option<Duration> {
        self.file_load_time
    }

    /// Load the configured CSV file
    pub fn load(&mut self, observer: &mut dyn ProgressObserver) -> Result<LoadReport, anyhow::Error> {
        let mut tracker = ProgressTracker::new();
        let path = self.config.csv_path().clone();
        self.file_load_time = None;
        let start = Instant::now();
        let report = self.loader.load(&path, &mut tracker, observer)?;
        let elapsed = start.elapsed();
        log::info!("Read {} in {:.3}s", path.display(), elapsed.as_secs_f64());
        self.file_load_time = Some(elapsed);
        Ok(report)
    }

    /// Sort the first `records` loaded records with `algorithm`. Returns the result together with
    /// the sorted, or partially sorted when cancelled, records.
    pub fn run_single(
        &mut self,
        algorithm: Algorithm,
        key: SortKey,
        records: usize,
        cancel: &CancelToken,
        observer: &mut dyn ProgressObserver,
    ) -> Result<(BenchmarkResult, Vec<Record>), anyhow::Error> {
        let (result, data) = self.execute(algorithm, key, records, cancel, observer)?;
        self.record(&result)?;
        Ok((result, data))
    }

    /// Run every algorithm on its own copy of the first `records` loaded records. Stops after the
    /// first cancelled run.
    pub fn run_comparison(
        &mut self,
        key: SortKey,
        records: usize,
        cancel: &CancelToken,
        observer: &mut dyn ProgressObserver,
    ) -> Result<Vec<BenchmarkResult>, anyhow::Error> {
        let mut results = Vec::with_capacity(Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            let (result, _data) = self.execute(algorithm, key, records, cancel, observer)?;
            self.record(&result)?;
            let completed = result.completed();
            results.push(result);
            if !completed {
                log::warn!("Comparison stopped after cancelled {}", algorithm);
                break;
            }
        }
        Ok(results)
    }

    fn execute(
        &self,
        algorithm: Algorithm,
        key: SortKey,
        records: usize,
        cancel: &CancelToken,
        observer: &mut dyn ProgressObserver,
    ) -> Result<(BenchmarkResult, Vec<Record>), anyhow::Error> {
        if self.loader.size() == 0 {
            return Err(anyhow!("No dataset loaded from {}", self.config.csv_path().display()));
        }
        if algorithm.is_quadratic() && records > self.config.quadratic_warning_threshold() {
            log::warn!("Sorting {} records with {} may take a long time", records, algorithm);
        }

        let load_start = Instant::now();
        let mut data = self.loader.get_data(records);
        let load_time = load_start.elapsed();

        let mut sorter = Sorter::new(algorithm, key);
        sorter.with_cancel_token(cancel.clone());
        sorter.with_update_frequency(self.config.update_frequency());
        let mut tracker = ProgressTracker::new();

        let sort_start = Instant::now();
        let outcome = sorter.run(&mut data, &mut tracker, observer);
        let sort_time = sort_start.elapsed();

        let result = BenchmarkResult::new(
            algorithm,
            key,
            data.len(),
            load_time,
            sort_time,
            tracker.comparisons(),
            tracker.swaps(),
            outcome == RunOutcome::Completed,
        );
        Ok((result, data))
    }

    fn record(&mut self, result: &BenchmarkResult) -> Result<(), anyhow::Error> {
        self.history.push(result.clone());
        bench_log::append_entry(self.config.log_path(), result)
    }
}
