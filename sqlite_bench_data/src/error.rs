// Error types for sqlite_bench_data
// sqlite_bench_data 错误类型

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("time out of range: {0}")]
  Time(#[from] time::error::ComponentRange),
}

pub type Result<T> = std::result::Result<T, Error>;
