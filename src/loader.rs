use std::path::Path;

use anyhow::{anyhow, Context};
use csv::{ByteRecord, ReaderBuilder};
use regex::Regex;

use crate::config::DEFAULT_MAX_RECORDS;
use crate::progress::{NoProgress, ProgressObserver, ProgressTracker};
use crate::record::Record;

const LOAD_LABEL: &str = "Loading CSV";
const LOAD_UPDATE_ROWS: usize = 1000;

/// Outcome of a successful load
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadReport {
    /// Data rows read, header excluded
    pub rows: usize,
    /// Valid records kept
    pub records: usize,
    /// Rows rejected by validation
    pub skipped: usize,
}

/// Loads `id,first_name,last_name[,...]` CSV rows into validated [Record]s.
///
/// The first row is a header and is ignored. Fields may be quoted. Invalid rows are skipped and
/// counted, they never fail the load. Blank lines are not rows. Loading stops at the record cap.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use sort_bench::loader::DatasetLoader;
/// use sort_bench::progress::{NoProgress, ProgressTracker};
///
/// fn first_ten(path: &Path) -> Result<usize, anyhow::Error> {
///     let mut loader = DatasetLoader::new(100_000);
///     let report = loader.load(path, &mut ProgressTracker::new(), &mut NoProgress)?;
///     if report.skipped > 0 {
///         log::warn!("Skipped {} invalid records", report.skipped);
///     }
///     Ok(loader.get_data(10).len())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct DatasetLoader {
    records: Vec<Record>,
    max_records: usize,
    field_separator: u8,
    ignore_lines: Option<Regex>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        DatasetLoader::new(DEFAULT_MAX_RECORDS)
    }
}

impl DatasetLoader {
    /// Create an empty loader keeping at most `max_records` records, comma separated fields
    pub fn new(max_records: usize) -> DatasetLoader {
        DatasetLoader {
            records: Vec::new(),
            max_records,
            field_separator: b',',
            ignore_lines: None,
        }
    }

    /// Set the field separator. The default is b','
    pub fn with_field_separator(&mut self, field_separator: u8) {
        self.field_separator = field_separator;
    }

    /// Specify which rows to ignore. The regex is matched against the row fields joined by the
    /// separator. A matching row is neither loaded nor counted as skipped.
    pub fn with_ignore_lines(&mut self, r: Regex) {
        self.ignore_lines = Some(r);
    }

    pub fn max_records(&self) -> usize {
        self.max_records
    }

    /// Replace the loaded dataset with the records of the file at `path`.
    ///
    /// Fails when the file cannot be read, has no data rows, or yields no valid record.
    pub fn load(
        &mut self,
        path: &Path,
        tracker: &mut ProgressTracker,
        observer: &mut dyn ProgressObserver,
    ) -> Result<LoadReport, anyhow::Error> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .delimiter(self.field_separator)
            .from_path(path)
            .with_context(|| anyhow!("path: {}", path.display()))?;
        self.records.clear();

        tracker.set_total(self.max_records as u64);
        tracker.reset();

        let header = reader.byte_headers()
            .with_context(|| anyhow!("path: {}", path.display()))?;
        if header.is_empty() {
            return Err(anyhow!("path: {}, error: file is empty", path.display()));
        }

        let mut report = LoadReport { rows: 0, records: 0, skipped: 0 };
        let mut row = ByteRecord::new();
        loop {
            if self.records.len() >= self.max_records {
                break;
            }
            let more = reader.read_byte_record(&mut row)
                .with_context(|| anyhow!("path: {}, row: {}", path.display(), report.rows + 1))?;
            if !more {
                break;
            }
            report.rows += 1;

            if report.rows % LOAD_UPDATE_ROWS == 0 {
                tracker.set_current(self.records.len() as u64);
                observer.update(LOAD_LABEL, tracker);
            }

            if let Some(r) = &self.ignore_lines {
                if r.is_match(&self.joined(&row)) {
                    continue;
                }
            }

            match Self::parse_row(&row) {
                Ok(record) => self.records.push(record),
                Err(e) => {
                    let line = row.position().map(|p| p.line()).unwrap_or_default();
                    log::debug!("path: {}, line: {}, skipped: {:#}", path.display(), line, e);
                    report.skipped += 1;
                }
            }
        }
        report.records = self.records.len();

        tracker.set_current(report.records as u64);
        observer.finish(LOAD_LABEL, tracker);

        if report.rows == 0 {
            return Err(anyhow!("path: {}, error: no data rows after header", path.display()));
        }
        if report.records == 0 {
            return Err(anyhow!("path: {}, error: no valid records in {} rows", path.display(), report.rows));
        }
        if report.skipped > 0 {
            log::warn!("Skipped {} invalid records in {}", report.skipped, path.display());
        }
        log::info!("Loaded {} valid records from {}", report.records, path.display());
        Ok(report)
    }

    /// Load without progress reporting, reporting success as a boolean
    pub fn load_ok(&mut self, path: &Path) -> bool {
        match self.load(path, &mut ProgressTracker::new(), &mut NoProgress) {
            Ok(_) => true,
            Err(e) => {
                log::error!("Failed to load dataset: {e:#}");
                false
            }
        }
    }

    /// Copy of the first `min(n, size)` records
    pub fn get_data(&self, n: usize) -> Vec<Record> {
        self.records[..n.min(self.records.len())].to_vec()
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    fn joined(&self, row: &ByteRecord) -> String {
        let fields: Vec<String> = row.iter()
            .map(|field| String::from_utf8_lossy(field).into_owned())
            .collect();
        fields.join(&char::from(self.field_separator).to_string())
    }

    // Fields are decoded lossily, invalid UTF-8 does not fail the row
    fn parse_row(row: &ByteRecord) -> Result<Record, anyhow::Error> {
        if row.len() < 3 {
            return Err(anyhow!("expected at least 3 fields, found {}", row.len()));
        }
        let field = |i: usize| String::from_utf8_lossy(&row[i]).into_owned();
        let id_field = field(0);
        let id: i64 = id_field.trim().parse()
            .with_context(|| anyhow!("invalid id: {:?}", id_field))?;
        Record::new(id, &field(1), &field(2))
    }
}
