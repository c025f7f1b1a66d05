use std::path::PathBuf;

use crate::sort::DEFAULT_UPDATE_FREQUENCY;

/// Record cap of a loaded dataset
pub const DEFAULT_MAX_RECORDS: usize = 100_000;
/// Quadratic sorts above this many records log a warning before running
pub const DEFAULT_QUADRATIC_WARNING_THRESHOLD: usize = 10_000;

/// Benchmark settings.
///
/// * The dataset is read from `data/generated_data.csv`
/// * Results are appended to `logs/benchmark.log`
/// * At most 100 000 records are loaded
/// * Quadratic sorts report progress every 50 operations
#[derive(Clone, Debug)]
pub struct Config {
    csv_path: PathBuf,
    log_path: PathBuf,
    max_records: usize,
    update_frequency: u64,
    quadratic_warning_threshold: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    pub fn new() -> Config {
        Config {
            csv_path: PathBuf::from("data/generated_data.csv"),
            log_path: PathBuf::from("logs/benchmark.log"),
            max_records: DEFAULT_MAX_RECORDS,
            update_frequency: DEFAULT_UPDATE_FREQUENCY,
            quadratic_warning_threshold: DEFAULT_QUADRATIC_WARNING_THRESHOLD,
        }
    }

    pub fn with_csv_path(mut self, csv_path: PathBuf) -> Config {
        self.csv_path = csv_path;
        self
    }

    pub fn with_log_path(mut self, log_path: PathBuf) -> Config {
        self.log_path = log_path;
        self
    }

    pub fn with_max_records(mut self, max_records: usize) -> Config {
        self.max_records = max_records;
        self
    }

    pub fn with_update_frequency(mut self, update_frequency: u64) -> Config {
        self.update_frequency = update_frequency;
        self
    }

    pub fn with_quadratic_warning_threshold(mut self, threshold: usize) -> Config {
        self.quadratic_warning_threshold = threshold;
        self
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }

    pub fn log_path(&self) -> &PathBuf {
        &self.log_path
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    pub fn update_frequency(&self) -> u64 {
        self.update_frequency
    }

    pub fn quadratic_warning_threshold(&self) -> usize {
        self.quadratic_warning_threshold
    }
}
