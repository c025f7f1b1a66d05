use std::path::PathBuf;

use anyhow::Error;
use simple_logger::SimpleLogger;
use sort_bench::benchmark::Benchmark;
use sort_bench::cancel::CancelToken;
use sort_bench::config::Config;
use sort_bench::generator;
use sort_bench::progress::LogProgress;
use sort_bench::sort_key::SortKey;

use tikv_jemallocator::Jemalloc;
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

// cargo run -r --example benchmark_csv [csv path] [records] [column]
pub fn main() -> Result<(), Error> {
    SimpleLogger::new().with_level(log::LevelFilter::Info).init()?;

    let args: Vec<String> = std::env::args().collect();
    let records: usize = match args.get(2) {
        Some(records) => records.parse()?,
        None => 2000,
    };
    let column: SortKey = match args.get(3) {
        Some(column) => column.parse()?,
        None => SortKey::LastName,
    };

    let mut config = Config::new().with_log_path(PathBuf::from("./target/logs/benchmark.log"));
    match args.get(1) {
        Some(path) => config = config.with_csv_path(PathBuf::from(path)),
        None => {
            let path = PathBuf::from("./target/data/generated_data.csv");
            generator::write_csv(&path, records, &mut rand::thread_rng())?;
            config = config.with_csv_path(path);
        }
    }

    let mut benchmark = Benchmark::new(config);
    let report = benchmark.load(&mut LogProgress)?;
    log::info!("Rows: {}, records: {}, skipped: {}", report.rows, report.records, report.skipped);

    let results = benchmark.run_comparison(column, records, &CancelToken::new(), &mut LogProgress)?;
    println!(
        "{:<15} {:<11} {:>8} {:>12} {:>12} {:>14} {:>12} Status",
        "Algorithm", "Column", "Records", "Load Time", "Sort Time", "Comparisons", "Swaps"
    );
    for result in results {
        println!("{result}");
    }
    log::info!("Results appended to {}", benchmark.config().log_path().display());
    Ok(())
}
