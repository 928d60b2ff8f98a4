// SQLite driver benchmark CLI
// SQLite 驱动基准测试命令行

use std::path::PathBuf;

use clap::Parser;
use log::{error, info};
use sqlite_bench::{BenchConfig, BenchRunner, Result, RusqliteDb, Scenario, save_report};

/// Benchmark a SQLite driver against generated workloads
/// 用生成的工作负载评测 SQLite 驱动
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
  /// Database file, recreated for every run / 数据库文件，每次运行都会重建
  dbfile: PathBuf,

  /// Scenarios to run / 要运行的场景
  #[arg(
    long,
    value_delimiter = ',',
    default_value = "simple,real,complex,many,large,concurrent"
  )]
  benchmarks: Vec<Scenario>,

  /// JSON config, missing fields keep defaults / JSON 配置，缺失字段使用默认值
  #[arg(long)]
  config: Option<PathBuf>,

  /// Reader counts of concurrent and books, overrides the config
  /// concurrent 与 books 的读取者数量，覆盖配置
  #[arg(long, value_delimiter = ',')]
  workers: Option<Vec<usize>>,

  /// Seed of the real query sequence, overrides the config
  /// real 查询序列的种子，覆盖配置
  #[arg(long)]
  seed: Option<u64>,

  /// Directory for the JSON report / JSON 报告目录
  #[arg(long)]
  report: Option<PathBuf>,
}

fn run(args: Args) -> Result<()> {
  let mut config = match &args.config {
    Some(path) => BenchConfig::load(path)?,
    None => BenchConfig::default(),
  };
  if let Some(workers) = args.workers.clone() {
    config = config.workers(workers);
  }
  if let Some(seed) = args.seed {
    config = config.seed(seed);
  }
  info!("dbfile {}", args.dbfile.display());
  let runner = BenchRunner::<RusqliteDb>::new(&args.dbfile, config);
  let results = runner.run(&args.benchmarks)?;
  if let Some(dir) = &args.report
    && let Some(first) = results.first()
  {
    let path = save_report(dir, &first.driver, &results)?;
    info!("report {}", path.display());
  }
  Ok(())
}

fn main() {
  log_init::init();
  if let Err(e) = run(Args::parse()) {
    error!("{e}");
    std::process::exit(1);
  }
}
