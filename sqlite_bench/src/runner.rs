// Benchmark runner and configuration
// 基准测试运行器和配置

use std::{
  fmt,
  marker::PhantomData,
  path::{Path, PathBuf},
  thread,
  time::{Duration, Instant},
};

use humansize::{BINARY, format_size};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use sqlite_bench_data::{
  SEED, blog, books, cars, concurrent_users, fleet, large_users, plants, real_picks,
  simple_users,
  sql::{
    BOOKS_SCHEMA, CARS_SCHEMA, FLEET_SCHEMA, INSERT_ARTICLES, INSERT_BOOKS, INSERT_CARS,
    INSERT_COMMENTS, INSERT_DEVICES, INSERT_LOCATIONS, INSERT_PLANTS, INSERT_PROFILES,
    INSERT_USERS, PLANTS_SCHEMA, READER_PRAGMAS, SCHEMA, SELECT_BOOKS, SELECT_CARS, SELECT_FLEET,
    SELECT_PLANTS, SELECT_USER_ARTICLES_COMMENTS, SELECT_USERS, SELECT_USERS_ARTICLES_COMMENTS,
  },
};

use crate::{
  BenchDb, BenchResult, Error, LatencyHistogram, Param, Result, check, db_size, remove_db_files,
};

/// Named workload / 具名工作负载
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
  /// Bulk insert of users, one ordered read / 批量插入用户，一次有序读取
  Simple,
  /// One transaction per user, per-user joins / 每个用户一个事务，按用户连接查询
  Real,
  /// One transaction per table, one wide join / 每张表一个事务，一次宽连接
  Complex,
  /// Few users read many times / 少量用户重复读取
  Many,
  /// Large rows / 大行
  Large,
  /// Parallel readers / 并行读取
  Concurrent,
  /// Profiles, devices, locations join / 档案、设备、位置连接
  Fleet,
  /// Flat rows read many times / 扁平行重复读取
  Cars,
  /// Long names read many times / 长名称重复读取
  Plants,
  /// Flat rows, parallel readers / 扁平行，并行读取
  Books,
}

impl Scenario {
  /// Catalogue order / 目录顺序
  pub const ALL: [Scenario; 10] = [
    Self::Simple,
    Self::Real,
    Self::Complex,
    Self::Many,
    Self::Large,
    Self::Concurrent,
    Self::Fleet,
    Self::Cars,
    Self::Plants,
    Self::Books,
  ];

  /// Run when nothing is selected / 未指定时运行的场景
  pub const DEFAULT: [Scenario; 6] = [
    Self::Simple,
    Self::Real,
    Self::Complex,
    Self::Many,
    Self::Large,
    Self::Concurrent,
  ];

  /// CLI and config name / 命令行与配置中的名称
  pub fn name(self) -> &'static str {
    match self {
      Self::Simple => "simple",
      Self::Real => "real",
      Self::Complex => "complex",
      Self::Many => "many",
      Self::Large => "large",
      Self::Concurrent => "concurrent",
      Self::Fleet => "fleet",
      Self::Cars => "cars",
      Self::Plants => "plants",
      Self::Books => "books",
    }
  }
}

impl fmt::Display for Scenario {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Benchmark configuration / 基准测试配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BenchConfig {
  /// simple: user count / 用户数
  pub users: usize,
  /// complex: blog size / 博客规模
  pub blog_users: usize,
  pub articles_per_user: usize,
  pub comments_per_article: usize,
  /// real: blog size and query count / 博客规模与查询次数
  pub real_users: usize,
  pub real_articles_per_user: usize,
  pub real_comments_per_article: usize,
  pub real_queries: usize,
  /// many: user counts, reads per count / 用户数列表，每档读取次数
  pub many_counts: Vec<usize>,
  pub many_queries: usize,
  /// large: user count, email sizes in bytes / 用户数，邮箱字节数列表
  pub large_users: usize,
  pub large_sizes: Vec<usize>,
  /// concurrent and books: rows, reader counts / 行数，读取者数量列表
  pub concurrent_users: usize,
  pub workers: Vec<usize>,
  /// fleet: profiles × devices × locations / 档案 × 设备 × 位置
  pub fleet_profiles: usize,
  pub fleet_devices: usize,
  pub fleet_locations: usize,
  pub car_counts: Vec<usize>,
  pub car_queries: usize,
  pub plants: usize,
  pub plant_queries: usize,
  pub plant_name_lengths: Vec<usize>,
  pub books: usize,
  /// Seed of the real query sequence / real 查询序列的种子
  pub seed: u64,
}

impl Default for BenchConfig {
  fn default() -> Self {
    Self {
      users: 1_000_000,
      blog_users: 200,
      articles_per_user: 100,
      comments_per_article: 20,
      real_users: 100,
      real_articles_per_user: 20,
      real_comments_per_article: 20,
      real_queries: 1_000,
      many_counts: vec![10, 100, 1_000],
      many_queries: 1_000,
      large_users: 10_000,
      large_sizes: vec![50_000, 100_000, 200_000],
      concurrent_users: 1_000_000,
      workers: vec![2, 4, 8],
      fleet_profiles: 200,
      fleet_devices: 100,
      fleet_locations: 10,
      car_counts: vec![10, 100, 1_000],
      car_queries: 1_000,
      plants: 500,
      plant_queries: 100,
      plant_name_lengths: vec![2_000, 4_000, 8_000],
      books: 1_000_000,
      seed: SEED,
    }
  }
}

impl BenchConfig {
  /// Load JSON, missing fields keep defaults / 加载 JSON，缺失字段使用默认值
  pub fn load(path: &Path) -> Result<Self> {
    let json = std::fs::read_to_string(path)?;
    Ok(sonic_rs::from_str(&json)?)
  }

  /// Set reader counts / 设置读取者数量
  pub fn workers(mut self, workers: Vec<usize>) -> Self {
    self.workers = workers;
    self
  }

  /// Set seed / 设置种子
  pub fn seed(mut self, seed: u64) -> Self {
    self.seed = seed;
    self
  }
}

/// Run `f` inside one transaction / 在一个事务内运行 `f`
fn tx<D: BenchDb>(db: &mut D, f: impl FnOnce(&mut D) -> Result<()>) -> Result<()> {
  db.begin()?;
  f(db)?;
  db.commit()
}

fn timed<T>(f: impl FnOnce() -> Result<T>) -> Result<(T, Duration)> {
  let start = Instant::now();
  let r = f()?;
  Ok((r, start.elapsed()))
}

/// Repeated reads: only the reads count toward the phase
/// 重复读取：仅读取本身计入阶段耗时
struct Reads {
  total: Duration,
  hist: LatencyHistogram,
}

impl Reads {
  fn new() -> Result<Self> {
    Ok(Self {
      total: Duration::ZERO,
      hist: LatencyHistogram::new()?,
    })
  }

  fn read<T>(&mut self, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let (r, took) = timed(f)?;
    self.total += took;
    self.hist.record(took);
    Ok(r)
  }
}

/// Benchmark runner over one driver / 单个驱动的基准测试运行器
pub struct BenchRunner<D: BenchDb> {
  path: PathBuf,
  config: BenchConfig,
  _db: PhantomData<fn() -> D>,
}

impl<D: BenchDb> BenchRunner<D> {
  pub fn new(path: impl Into<PathBuf>, config: BenchConfig) -> Self {
    Self {
      path: path.into(),
      config,
      _db: PhantomData,
    }
  }

  /// Run selected scenarios in catalogue order, printing each result
  /// 按目录顺序运行所选场景，并打印每个结果
  pub fn run(&self, selected: &[Scenario]) -> Result<Vec<BenchResult>> {
    let mut results = Vec::new();
    for scenario in Scenario::ALL {
      if !selected.contains(&scenario) {
        continue;
      }
      info!("run {scenario}");
      for result in self.run_scenario(scenario)? {
        println!("{result}");
        results.push(result);
      }
    }
    Ok(results)
  }

  /// One scenario, one result per parameter value / 单个场景，每个参数值一个结果
  pub fn run_scenario(&self, scenario: Scenario) -> Result<Vec<BenchResult>> {
    let c = &self.config;
    match scenario {
      Scenario::Simple => Ok(vec![self.simple()?]),
      Scenario::Real => Ok(vec![self.real()?]),
      Scenario::Complex => Ok(vec![self.complex()?]),
      Scenario::Many => c.many_counts.iter().map(|&n| self.many(n)).collect(),
      Scenario::Large => c.large_sizes.iter().map(|&n| self.large(n)).collect(),
      Scenario::Concurrent => c.workers.iter().map(|&k| self.concurrent(k)).collect(),
      Scenario::Fleet => Ok(vec![self.fleet()?]),
      Scenario::Cars => c.car_counts.iter().map(|&n| self.cars(n)).collect(),
      Scenario::Plants => c.plant_name_lengths.iter().map(|&n| self.plants(n)).collect(),
      Scenario::Books => c.workers.iter().map(|&k| self.books(k)).collect(),
    }
  }

  /// Fresh database with schema / 带表结构的全新数据库
  fn setup(&self, schema: &[&str]) -> Result<D> {
    remove_db_files(&self.path)?;
    let mut db = D::open(&self.path)?;
    db.exec(schema)?;
    Ok(db)
  }

  fn finish(
    &self,
    bench: String,
    db: D,
    insert: Duration,
    query: Duration,
    hist: Option<&LatencyHistogram>,
  ) -> Result<BenchResult> {
    let driver = db.name().to_owned();
    db.close()?;
    self.result(bench, driver, insert, query, hist)
  }

  fn result(
    &self,
    bench: String,
    driver: String,
    insert: Duration,
    query: Duration,
    hist: Option<&LatencyHistogram>,
  ) -> Result<BenchResult> {
    let db_bytes = db_size(&self.path);
    debug!("{bench}: insert {insert:.2?}, query {query:.2?}");
    if let Some(h) = hist.filter(|h| !h.is_empty()) {
      debug!(
        "{bench}: {} reads, p50 {}us, p99 {}us, max {}us",
        h.count(),
        h.p50(),
        h.p99(),
        h.max()
      );
    }
    info!("{bench}: dbsize {}", format_size(db_bytes, BINARY));
    Ok(BenchResult::new(bench, driver, insert, query, db_bytes).latency(hist.and_then(|h| h.stats())))
  }

  /// Open `k` readers, then time them reading in parallel
  /// 打开 `k` 个读取者，然后对并行读取计时
  fn read_concurrently(
    &self,
    k: usize,
    read: impl Fn(&mut D) -> Result<()> + Sync,
  ) -> Result<(Duration, LatencyHistogram)> {
    let readers = (0..k)
      .map(|_| {
        let mut db = D::open(&self.path)?;
        db.exec(READER_PRAGMAS)?;
        Ok(db)
      })
      .collect::<Result<Vec<D>>>()?;

    let read = &read;
    let start = Instant::now();
    let outcomes: Vec<Result<(D, Duration)>> = thread::scope(|s| {
      let handles: Vec<_> = readers
        .into_iter()
        .map(|mut db| {
          s.spawn(move || -> Result<(D, Duration)> {
            let t = Instant::now();
            read(&mut db)?;
            Ok((db, t.elapsed()))
          })
        })
        .collect();
      handles
        .into_iter()
        .enumerate()
        .map(|(i, h)| {
          h.join()
            .unwrap_or_else(|_| Err(Error::Worker(format!("reader {i} panicked"))))
        })
        .collect()
    });
    let query = start.elapsed();

    let mut hist = LatencyHistogram::new()?;
    let mut dbs = Vec::with_capacity(k);
    for outcome in outcomes {
      let (db, took) = outcome?;
      hist.record(took);
      dbs.push(db);
    }
    for db in dbs {
      db.close()?;
    }
    Ok((query, hist))
  }

  fn simple(&self) -> Result<BenchResult> {
    let users = simple_users(self.config.users);
    let mut db = self.setup(SCHEMA)?;
    let ((), insert) = timed(|| tx(&mut db, |db| db.insert_users(INSERT_USERS, &users)))?;
    let (found, query) = timed(|| db.find_users(SELECT_USERS))?;
    check::users_match(&users, &found)?;
    self.finish("1_simple".into(), db, insert, query, None)
  }

  fn real(&self) -> Result<BenchResult> {
    let c = &self.config;
    let blog = blog(
      c.real_users,
      c.real_articles_per_user,
      c.real_comments_per_article,
    );
    let mut db = self.setup(SCHEMA)?;
    let ((), insert) = timed(|| {
      for (user, articles, comments) in blog.threads() {
        tx(&mut db, |db| {
          db.insert_users(INSERT_USERS, std::slice::from_ref(user))?;
          db.insert_articles(INSERT_ARTICLES, articles)?;
          db.insert_comments(INSERT_COMMENTS, comments)
        })?;
      }
      Ok(())
    })?;

    let mut reads = Reads::new()?;
    for id in real_picks(c.real_users, c.real_queries, c.seed) {
      let (users, articles, comments) = reads.read(|| {
        db.find_users_articles_comments(SELECT_USER_ARTICLES_COMMENTS, &[Param::Int(id)])
      })?;
      check::thread_matches(&blog, id, &users, &articles, &comments)?;
    }
    self.finish("2_real".into(), db, insert, reads.total, Some(&reads.hist))
  }

  fn complex(&self) -> Result<BenchResult> {
    let c = &self.config;
    let blog = blog(c.blog_users, c.articles_per_user, c.comments_per_article);
    let mut db = self.setup(SCHEMA)?;
    let ((), insert) = timed(|| {
      tx(&mut db, |db| db.insert_users(INSERT_USERS, &blog.users))?;
      tx(&mut db, |db| db.insert_articles(INSERT_ARTICLES, &blog.articles))?;
      tx(&mut db, |db| db.insert_comments(INSERT_COMMENTS, &blog.comments))
    })?;
    let ((users, articles, comments), query) =
      timed(|| db.find_users_articles_comments(SELECT_USERS_ARTICLES_COMMENTS, &[]))?;
    check::blog_matches(&blog, &users, &articles, &comments)?;
    self.finish("3_complex".into(), db, insert, query, None)
  }

  fn many(&self, n: usize) -> Result<BenchResult> {
    let users = simple_users(n);
    let mut db = self.setup(SCHEMA)?;
    let ((), insert) = timed(|| tx(&mut db, |db| db.insert_users(INSERT_USERS, &users)))?;

    let mut reads = Reads::new()?;
    let mut last = None;
    for _ in 0..self.config.many_queries {
      let found = reads.read(|| db.find_users(SELECT_USERS))?;
      check::eq("user count", n, found.len())?;
      last = Some(found);
    }
    if let Some(found) = last {
      check::users_match(&users, &found)?;
    }
    self.finish(
      format!("4_many/{n:04}"),
      db,
      insert,
      reads.total,
      Some(&reads.hist),
    )
  }

  fn large(&self, size: usize) -> Result<BenchResult> {
    let n = self.config.large_users;
    let users = large_users(n, size);
    let mut db = self.setup(SCHEMA)?;
    let ((), insert) = timed(|| tx(&mut db, |db| db.insert_users(INSERT_USERS, &users)))?;
    drop(users);
    let (found, query) = timed(|| db.find_users(SELECT_USERS))?;
    check::large_users_ok(n, size, &found)?;
    self.finish(format!("5_large/{size:06}"), db, insert, query, None)
  }

  fn concurrent(&self, k: usize) -> Result<BenchResult> {
    let n = self.config.concurrent_users;
    let users = concurrent_users(n);
    let mut db = self.setup(SCHEMA)?;
    let ((), insert) = timed(|| tx(&mut db, |db| db.insert_users(INSERT_USERS, &users)))?;
    drop(users);
    let driver = db.name().to_owned();
    db.close()?;

    let (query, hist) = self.read_concurrently(k, |db| {
      let found = db.find_users(SELECT_USERS)?;
      check::concurrent_users_ok(n, &found)
    })?;
    self.result(format!("6_concurrent/{k}"), driver, insert, query, Some(&hist))
  }

  fn fleet(&self) -> Result<BenchResult> {
    let c = &self.config;
    let fleet = fleet(c.fleet_profiles, c.fleet_devices, c.fleet_locations);
    let mut db = self.setup(FLEET_SCHEMA)?;
    let ((), insert) = timed(|| {
      tx(&mut db, |db| db.insert_profiles(INSERT_PROFILES, &fleet.profiles))?;
      tx(&mut db, |db| db.insert_devices(INSERT_DEVICES, &fleet.devices))?;
      tx(&mut db, |db| db.insert_locations(INSERT_LOCATIONS, &fleet.locations))
    })?;
    let ((profiles, devices, locations), query) =
      timed(|| db.find_fleet(SELECT_FLEET, &[Param::Bool(false), Param::Bool(true)]))?;
    check::fleet_matches(&fleet, &profiles, &devices, &locations)?;
    self.finish("7_fleet".into(), db, insert, query, None)
  }

  fn cars(&self, n: usize) -> Result<BenchResult> {
    let cars = cars(n);
    let mut db = self.setup(CARS_SCHEMA)?;
    let ((), insert) = timed(|| tx(&mut db, |db| db.insert_cars(INSERT_CARS, &cars)))?;

    let mut reads = Reads::new()?;
    let mut last = None;
    for _ in 0..self.config.car_queries {
      let found = reads.read(|| db.find_cars(SELECT_CARS))?;
      check::eq("car count", n, found.len())?;
      last = Some(found);
    }
    if let Some(found) = last {
      check::cars_match(&cars, &found)?;
    }
    self.finish(
      format!("8_cars/{n:04}"),
      db,
      insert,
      reads.total,
      Some(&reads.hist),
    )
  }

  fn plants(&self, name_len: usize) -> Result<BenchResult> {
    let n = self.config.plants;
    let plants = plants(n, name_len);
    let mut db = self.setup(PLANTS_SCHEMA)?;
    let ((), insert) = timed(|| tx(&mut db, |db| db.insert_plants(INSERT_PLANTS, &plants)))?;

    let mut reads = Reads::new()?;
    for _ in 0..self.config.plant_queries {
      let found = reads.read(|| db.find_plants(SELECT_PLANTS))?;
      check::plants_ok(n, name_len, &found)?;
    }
    self.finish(
      format!("9_plants/{name_len:05}"),
      db,
      insert,
      reads.total,
      Some(&reads.hist),
    )
  }

  fn books(&self, k: usize) -> Result<BenchResult> {
    let n = self.config.books;
    let books = books(n);
    let mut db = self.setup(BOOKS_SCHEMA)?;
    let ((), insert) = timed(|| tx(&mut db, |db| db.insert_books(INSERT_BOOKS, &books)))?;
    drop(books);
    let driver = db.name().to_owned();
    db.close()?;

    let (query, hist) = self.read_concurrently(k, |db| {
      let found = db.find_books(SELECT_BOOKS)?;
      check::books_ok(n, &found)
    })?;
    self.result(format!("10_books/{k}"), driver, insert, query, Some(&hist))
  }
}
