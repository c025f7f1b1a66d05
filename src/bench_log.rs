use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context};
use chrono::NaiveDateTime;

use crate::benchmark::BenchmarkResult;

const SEPARATOR: &str = "========================================";

/// Format one log block for `result`, stamped with `timestamp`
pub fn format_entry(result: &BenchmarkResult, timestamp: &NaiveDateTime) -> String {
    let mut entry = String::new();
    entry.push_str(SEPARATOR);
    entry.push('\n');
    entry.push_str(&format!("Timestamp: {}\n", timestamp.format("%Y-%m-%d %H:%M:%S")));
    entry.push_str(&format!("Algorithm: {}\n", result.algorithm().name()));
    entry.push_str(&format!("Column: {}\n", result.column().name()));
    entry.push_str(&format!("Records: {}\n", result.record_count()));
    entry.push_str(&format!("Load Time: {:.3}s\n", result.load_time().as_secs_f64()));
    entry.push_str(&format!("Sort Time: {:.3}s\n", result.sort_time().as_secs_f64()));
    entry.push_str(&format!("Total Time: {:.3}s\n", result.total_time().as_secs_f64()));
    entry.push_str(&format!("Comparisons: {}\n", result.comparisons()));
    entry.push_str(&format!("Swaps: {}\n", result.swaps()));
    entry.push_str(&format!("Completed: {}\n", if result.completed() { "Yes" } else { "No" }));
    entry.push_str(SEPARATOR);
    entry.push_str("\n\n");
    entry
}

/// Append a block for `result` to the log at `path`, creating the file and its directory if
/// missing. Existing content is never truncated.
pub fn append_entry(path: &Path, result: &BenchmarkResult) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| anyhow!("path: {}", parent.display()))?;
        }
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| anyhow!("path: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    let timestamp = chrono::Local::now().naive_local();
    writer.write_all(format_entry(result, &timestamp).as_bytes())
        .with_context(|| anyhow!("path: {}", path.display()))?;
    writer.flush()?;
    log::debug!("Appended {} result to {}", result.algorithm(), path.display());
    Ok(())
}
