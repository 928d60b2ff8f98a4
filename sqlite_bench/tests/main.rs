use std::path::PathBuf;

use aok::{OK, Void};
use sqlite_bench::{BenchConfig, Scenario, db_files, db_size, remove_db_files};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

/// Small enough to finish in well under a second
/// 足够小，运行远少于一秒
fn tiny() -> BenchConfig {
  BenchConfig {
    users: 100,
    blog_users: 5,
    articles_per_user: 3,
    comments_per_article: 2,
    real_users: 4,
    real_articles_per_user: 2,
    real_comments_per_article: 2,
    real_queries: 10,
    many_counts: vec![1, 5],
    many_queries: 3,
    large_users: 3,
    large_sizes: vec![10, 1000],
    concurrent_users: 50,
    workers: vec![1, 3],
    fleet_profiles: 2,
    fleet_devices: 2,
    fleet_locations: 2,
    car_counts: vec![3],
    car_queries: 2,
    plants: 4,
    plant_queries: 2,
    plant_name_lengths: vec![20],
    books: 30,
    seed: 7,
  }
}

fn db_path(dir: &tempfile::TempDir) -> PathBuf {
  dir.path().join("bench.db")
}

#[test]
fn test_remove_db_files() -> Void {
  let dir = tempfile::tempdir()?;
  let path = db_path(&dir);
  let files = db_files(&path);
  assert!(files[1].to_string_lossy().ends_with("bench.db-journal"));
  assert!(files[2].to_string_lossy().ends_with("bench.db-wal"));
  assert!(files[3].to_string_lossy().ends_with("bench.db-shm"));

  // Nothing there yet / 尚不存在
  remove_db_files(&path)?;
  assert_eq!(db_size(&path), 0);

  std::fs::write(&files[0], [0u8; 100])?;
  std::fs::write(&files[2], [0u8; 20])?;
  std::fs::write(&files[3], [0u8; 3])?;
  assert_eq!(db_size(&path), 123);

  remove_db_files(&path)?;
  for f in &files {
    assert!(!f.exists());
  }
  assert_eq!(db_size(&path), 0);
  OK
}

#[test]
fn test_config_load() -> Void {
  let dir = tempfile::tempdir()?;
  let path = dir.path().join("bench.json");
  std::fs::write(&path, r#"{"users": 10, "workers": [16], "seed": 1}"#)?;
  let config = BenchConfig::load(&path)?;
  assert_eq!(config.users, 10);
  assert_eq!(config.workers, vec![16]);
  assert_eq!(config.seed, 1);
  // Missing fields keep defaults / 缺失字段保持默认值
  assert_eq!(config.blog_users, 200);
  assert_eq!(config.large_sizes, vec![50_000, 100_000, 200_000]);

  std::fs::write(&path, "{not json")?;
  assert!(BenchConfig::load(&path).is_err());
  OK
}

#[test]
fn test_config_setters() {
  let config = BenchConfig::default().workers(vec![1, 16]).seed(9);
  assert_eq!(config.workers, vec![1, 16]);
  assert_eq!(config.seed, 9);
  assert_eq!(config.users, BenchConfig::default().users);
}

#[test]
fn test_scenario_names() {
  let names: Vec<_> = Scenario::DEFAULT.iter().map(|s| s.to_string()).collect();
  assert_eq!(
    names,
    ["simple", "real", "complex", "many", "large", "concurrent"]
  );
  for s in Scenario::DEFAULT {
    assert!(Scenario::ALL.contains(&s));
  }
}

#[cfg(feature = "rusqlite")]
mod rusqlite_run {
  use aok::{OK, Void};
  use log::info;
  use sqlite_bench::{
    BenchDb, BenchResult, BenchRunner, Param, RusqliteDb, Scenario, db_size,
  };
  use sqlite_bench_data::{
    User, blog, clock,
    sql::{
      INSERT_ARTICLES, INSERT_COMMENTS, INSERT_USERS, SCHEMA, SELECT_USER_ARTICLES_COMMENTS,
      SELECT_USERS, SELECT_USERS_ARTICLES_COMMENTS,
    },
  };

  use super::{db_path, tiny};

  fn fresh(path: &std::path::Path) -> sqlite_bench::Result<RusqliteDb> {
    sqlite_bench::remove_db_files(path)?;
    let mut db = RusqliteDb::open(path)?;
    db.exec(SCHEMA)?;
    Ok(db)
  }

  #[test]
  fn test_all_scenarios() -> Void {
    let dir = tempfile::tempdir()?;
    let path = db_path(&dir);
    let runner = BenchRunner::<RusqliteDb>::new(&path, tiny());
    let results = runner.run(&Scenario::ALL)?;

    let benches: Vec<_> = results.iter().map(|r| r.bench.as_str()).collect();
    assert_eq!(
      benches,
      [
        "1_simple",
        "2_real",
        "3_complex",
        "4_many/0001",
        "4_many/0005",
        "5_large/000010",
        "5_large/001000",
        "6_concurrent/1",
        "6_concurrent/3",
        "7_fleet",
        "8_cars/0003",
        "9_plants/00020",
        "10_books/1",
        "10_books/3",
      ]
    );
    for r in &results {
      assert_eq!(r.driver, "rusqlite");
      assert!(r.db_bytes > 0, "{} dbsize", r.bench);
    }
    // Last run leaves its file behind / 最后一次运行保留其文件
    assert_eq!(results.last().map(|r| r.db_bytes), Some(db_size(&path)));
    info!("{} results", results.len());
    OK
  }

  #[test]
  fn test_latency_recorded() -> Void {
    let dir = tempfile::tempdir()?;
    let runner = BenchRunner::<RusqliteDb>::new(db_path(&dir), tiny());
    let results = runner.run(&[Scenario::Real, Scenario::Many, Scenario::Concurrent])?;
    let count = |r: &BenchResult| r.latency.as_ref().map(|l| l.count);
    assert_eq!(count(&results[0]), Some(10));
    assert_eq!(count(&results[1]), Some(3));
    assert_eq!(count(&results[3]), Some(1));
    assert_eq!(count(&results[4]), Some(3));

    let simple = runner.run(&[Scenario::Simple])?;
    assert!(simple[0].latency.is_none());
    OK
  }

  #[test]
  fn test_selection_runs_in_catalogue_order() -> Void {
    let dir = tempfile::tempdir()?;
    let runner = BenchRunner::<RusqliteDb>::new(db_path(&dir), tiny());
    let results = runner.run(&[Scenario::Fleet, Scenario::Simple])?;
    let benches: Vec<_> = results.iter().map(|r| r.bench.as_str()).collect();
    assert_eq!(benches, ["1_simple", "7_fleet"]);
    OK
  }

  #[test]
  fn test_zero_time_round_trip() -> Void {
    let dir = tempfile::tempdir()?;
    let mut db = fresh(&db_path(&dir))?;
    let users = vec![
      User::new(1, clock::ZERO, "zero@example.com", false),
      User::new(2, clock::BASE, "base@example.com", true),
    ];
    db.begin()?;
    db.insert_users(INSERT_USERS, &users)?;
    db.commit()?;
    assert_eq!(db.find_users(SELECT_USERS)?, users);
    db.close()?;
    OK
  }

  #[test]
  fn test_join_fan_out() -> Void {
    let dir = tempfile::tempdir()?;
    let mut db = fresh(&db_path(&dir))?;
    let b = blog(2, 2, 3);
    db.begin()?;
    db.insert_users(INSERT_USERS, &b.users)?;
    db.insert_articles(INSERT_ARTICLES, &b.articles)?;
    db.insert_comments(INSERT_COMMENTS, &b.comments)?;
    db.commit()?;

    // 12 joined rows collapse to 2 users, 4 articles, 12 comments
    // 12 行连接结果折叠为 2 个用户、4 篇文章、12 条评论
    let (users, articles, comments) =
      db.find_users_articles_comments(SELECT_USERS_ARTICLES_COMMENTS, &[])?;
    assert_eq!(users, b.users);
    assert_eq!(articles, b.articles);
    assert_eq!(comments, b.comments);

    let (users, articles, comments) =
      db.find_users_articles_comments(SELECT_USER_ARTICLES_COMMENTS, &[Param::Int(2)])?;
    assert_eq!(users, b.users[1..]);
    assert_eq!(articles, b.articles[2..]);
    assert_eq!(comments, b.comments[6..]);
    db.close()?;
    OK
  }

  #[test]
  fn test_join_without_children() -> Void {
    let dir = tempfile::tempdir()?;
    let mut db = fresh(&db_path(&dir))?;
    let b = blog(3, 0, 0);
    db.begin()?;
    db.insert_users(INSERT_USERS, &b.users)?;
    db.commit()?;
    let (users, articles, comments) =
      db.find_users_articles_comments(SELECT_USERS_ARTICLES_COMMENTS, &[])?;
    assert_eq!(users, b.users);
    assert!(articles.is_empty());
    assert!(comments.is_empty());
    db.close()?;
    OK
  }

  #[test]
  fn test_insert_needs_parent() -> Void {
    let dir = tempfile::tempdir()?;
    let mut db = fresh(&db_path(&dir))?;
    let b = blog(1, 1, 0);
    // foreign_keys=1 rejects an article of a missing user
    // foreign_keys=1 拒绝引用不存在用户的文章
    assert!(db.insert_articles(INSERT_ARTICLES, &b.articles).is_err());
    db.close()?;
    OK
  }
}

mod latency_prop {
  use std::time::Duration;

  use proptest::prelude::*;
  use sqlite_bench::LatencyHistogram;

  proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// min <= p50 <= p99 <= max, mean within [min, max]
    #[test]
    fn prop_latency_histogram_consistency(
      latencies in prop::collection::vec(1u64..1_000_000_000u64, 10..500)
    ) {
      let mut hist = LatencyHistogram::new().expect("create histogram");
      for &lat in &latencies {
        hist.record(Duration::from_micros(lat));
      }
      prop_assert_eq!(hist.count(), latencies.len() as u64);

      let (min, p50, p99, max, mean) = (hist.min(), hist.p50(), hist.p99(), hist.max(), hist.mean());
      prop_assert!(min <= p50, "min({min}) <= p50({p50})");
      prop_assert!(p50 <= p99, "p50({p50}) <= p99({p99})");
      prop_assert!(p99 <= max, "p99({p99}) <= max({max})");
      prop_assert!(mean >= min as f64, "mean({mean}) >= min({min})");
      prop_assert!(mean <= max as f64, "mean({mean}) <= max({max})");

      let stats = hist.stats().expect("recorded");
      prop_assert_eq!(stats.count, hist.count());
    }
  }

  #[test]
  fn test_empty_and_clamped() {
    let mut hist = LatencyHistogram::new().expect("create histogram");
    assert!(hist.stats().is_none());
    hist.record(Duration::ZERO);
    hist.record(Duration::from_secs(7200));
    assert_eq!(hist.min(), 1);
    assert!(hist.max() >= 3_599_000_000);
  }
}
