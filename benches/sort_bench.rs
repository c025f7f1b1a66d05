use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Error};
use benchmark_rs::benchmarks::Benchmarks;
use benchmark_rs::stopwatch::StopWatch;
use rand::SeedableRng;
use rand::rngs::StdRng;
use simple_logger::SimpleLogger;

use sort_bench::algorithm::Algorithm;
use sort_bench::cancel::CancelToken;
use sort_bench::generator;
use sort_bench::loader::DatasetLoader;
use sort_bench::progress::{NoProgress, ProgressTracker};
use sort_bench::sort::{sort, RunOutcome};
use sort_bench::sort_key::SortKey;

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

#[derive(Clone)]
pub struct BenchmarkConfig {
    loader: DatasetLoader,
    algorithm: Algorithm,
    key: SortKey,
}

impl BenchmarkConfig {
    pub fn new(loader: DatasetLoader, algorithm: Algorithm, key: SortKey) -> BenchmarkConfig {
        BenchmarkConfig {
            loader,
            algorithm,
            key,
        }
    }
}

impl Display for BenchmarkConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "algorithm: {}, column: {}, dataset: {}",
                 self.algorithm,
                 self.key,
                 self.loader.size(),
        )
    }
}

fn setup(bench_input_dir: &PathBuf) -> Result<(), anyhow::Error> {
    if !bench_input_dir.exists() {
        fs::create_dir_all(bench_input_dir.clone())
            .with_context(|| anyhow!("{}", bench_input_dir.to_string_lossy()))?;
    }
    Ok(())
}

fn sort_records(stop_watch: &mut StopWatch, config: BenchmarkConfig, work: usize) -> Result<(), anyhow::Error> {
    stop_watch.pause();
    let mut data = config.loader.get_data(work);
    let mut tracker = ProgressTracker::new();
    stop_watch.resume();
    let outcome = sort(config.algorithm, config.key, &mut data, &mut tracker, &CancelToken::new());
    stop_watch.pause();
    if outcome != RunOutcome::Completed {
        return Err(anyhow!("{} did not complete", config.algorithm));
    }
    Ok(())
}

#[test]
fn sort_bench() -> Result<(), Error> {
    SimpleLogger::new().init().unwrap();
    log::info!("Started sort_bench.");

    let bench_input_dir = PathBuf::from("./target/benchmarks/input");
    setup(&bench_input_dir)?;
    let input_path = bench_input_dir.join("records-20000.csv");
    if !input_path.exists() {
        generator::write_csv(&input_path, 20_000, &mut StdRng::seed_from_u64(42))?;
    }
    let mut loader = DatasetLoader::default();
    loader.load(&input_path, &mut ProgressTracker::new(), &mut NoProgress)?;

    let quadratic_work: Vec<usize> = (1..=10).map(|i| i * 200).collect();
    let merge_work: Vec<usize> = (1..=10).map(|i| i * 2000).collect();

    let runs = [
        ("bubble-id", Algorithm::Bubble, SortKey::Id),
        ("insertion-id", Algorithm::Insertion, SortKey::Id),
        ("merge-id", Algorithm::Merge, SortKey::Id),
        ("bubble-first-name", Algorithm::Bubble, SortKey::FirstName),
        ("insertion-first-name", Algorithm::Insertion, SortKey::FirstName),
        ("merge-first-name", Algorithm::Merge, SortKey::FirstName),
        ("bubble-last-name", Algorithm::Bubble, SortKey::LastName),
        ("insertion-last-name", Algorithm::Insertion, SortKey::LastName),
        ("merge-last-name", Algorithm::Merge, SortKey::LastName),
    ];

    let mut benchmarks = Benchmarks::new("sort-bench");
    for (name, algorithm, key) in runs {
        let work = if algorithm.is_quadratic() { quadratic_work.clone() } else { merge_work.clone() };
        benchmarks.add(
            name,
            sort_records,
            BenchmarkConfig::new(loader.clone(), algorithm, key),
            work,
            3,
            0,
        )?;
    }

    benchmarks.run()?;
    benchmarks.save_to_csv(PathBuf::from("./target/benchmarks/"), true, true)?;
    benchmarks.save_to_json(PathBuf::from("./target/benchmarks/"))?;

    log::info!("Finished sort_bench.");
    Ok(())
}
