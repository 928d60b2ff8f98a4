use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
  #[error("Data error: {0}")]
  Data(#[from] sqlite_bench_data::Error),

  #[cfg(feature = "rusqlite")]
  #[error("SQLite error: {0}")]
  Sqlite(#[from] rusqlite::Error),

  #[error("Histogram error: {0}")]
  Histogram(#[from] hdrhistogram::CreationError),

  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),

  #[error("JSON error: {0}")]
  Json(#[from] sonic_rs::Error),

  /// Query result differs from generated data / 查询结果与生成数据不一致
  #[error("check failed: {what}: expected {expected} but was {actual}")]
  Check {
    what: String,
    expected: String,
    actual: String,
  },

  #[error("db file still exists: {0}")]
  DbFileRemains(PathBuf),

  #[error("worker failed: {0}")]
  Worker(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
