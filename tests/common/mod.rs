use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use data_encoding::HEXLOWER;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sort_bench::record::Record;
use tempfile::TempDir;

/// Fixture directory removed when dropped
#[allow(dead_code)]
pub fn setup() -> TempDir {
    tempfile::Builder::new()
        .prefix("sort-bench-")
        .tempdir()
        .unwrap_or_else(|e| panic!("Failed to create fixture directory: {e}"))
}

#[allow(dead_code)]
pub fn read_lines(path: PathBuf) -> Result<Vec<String>, anyhow::Error> {
    let reader = BufReader::new(File::open(path)?);
    let lines = reader.lines().map(|x| x.unwrap()).collect();
    Ok(lines)
}

#[allow(dead_code)]
pub fn temp_file_name(dir: &Path) -> PathBuf {
    let mut result = dir.to_path_buf();
    let name = HEXLOWER.encode(&rand::random::<[u8; 16]>());
    result.push(name);
    result
}

/// Write `lines` to a fresh file in `dir`
#[allow(dead_code)]
pub fn write_lines(dir: &Path, lines: &[&str]) -> Result<PathBuf, anyhow::Error> {
    let path = temp_file_name(dir);
    let mut writer = BufWriter::new(File::create(&path)?);
    for line in lines {
        writeln!(writer, "{line}")?;
    }
    writer.flush()?;
    Ok(path)
}

/// Seeded records with few distinct names and ids so that equal keys are common
#[allow(dead_code)]
pub fn random_records(count: usize, seed: u64) -> Vec<Record> {
    let names = ["ann", "bob", "cy", "Dee", "eve"];
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let id = rng.gen_range(1..=(count as i64 / 3 + 1));
            let first = names[rng.gen_range(0..names.len())];
            let last = names[rng.gen_range(0..names.len())];
            Record::new(id, first, last).unwrap()
        })
        .collect()
}

/// True when both slices hold the same multiset of records
#[allow(dead_code)]
pub fn same_records(a: &[Record], b: &[Record]) -> bool {
    let order = |r: &Record| (r.id(), r.first_name().to_string(), r.last_name().to_string());
    let mut a: Vec<_> = a.iter().map(order).collect();
    let mut b: Vec<_> = b.iter().map(order).collect();
    a.sort();
    b.sort();
    a == b
}
