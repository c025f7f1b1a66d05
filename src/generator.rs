use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context};
use rand::Rng;
use rand::seq::SliceRandom;

const FIRST_NAMES: [&str; 16] = [
    "Alice", "Bruno", "Chen", "Dana", "Emeka", "Farah", "Goran", "Hana",
    "Ivan", "Julia", "Kenji", "Lena", "Mateo", "Nadia", "Omar", "Priya",
];

const LAST_NAMES: [&str; 16] = [
    "Anders", "Bauer", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Horvat",
    "Ito", "Jansen", "Kowalski", "Lopez", "Moreau", "Novak", "Okafor", "Petrov",
];

/// Write a CSV dataset of `count` rows with a header, distinct ids `1..=count` in random order
/// and randomly drawn names. Duplicate names are frequent, which exercises sort stability.
pub fn write_csv<R: Rng>(path: &Path, count: usize, rng: &mut R) -> Result<(), anyhow::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| anyhow!("path: {}", parent.display()))?;
        }
    }

    let mut ids: Vec<usize> = (1..=count).collect();
    ids.shuffle(rng);

    let mut writer = BufWriter::new(
        File::create(path)
            .with_context(|| anyhow!("path: {}", path.display()))?
    );
    writeln!(writer, "ID,FirstName,LastName")?;
    for id in ids {
        let first_name = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
        let last_name = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
        writeln!(writer, "{id},{first_name},{last_name}")?;
    }
    writer.flush()?;
    log::info!("Generated {} records in {}", count, path.display());
    Ok(())
}
