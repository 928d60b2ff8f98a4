// Benchmark metrics types
// 基准测试指标类型

use std::{
  fmt,
  path::{Path, PathBuf},
  time::Duration,
};

use serde::{Deserialize, Serialize};
use sonic_rs::to_string_pretty;

use crate::{LatencyStats, Result};

/// Phase column of a metrics line / 指标行的阶段列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
  Insert,
  Query,
  DbSize,
}

impl fmt::Display for Phase {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Padded so the columns line up / 补齐宽度以对齐列
    f.write_str(match self {
      Self::Insert => "insert",
      Self::Query => "query ",
      Self::DbSize => "dbsize",
    })
  }
}

/// Result of one scenario run / 单次场景运行结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BenchResult {
  /// Scenario id, e.g. `4_many/0010` / 场景标识
  pub bench: String,
  /// Driver name / 驱动名称
  pub driver: String,
  pub insert_ms: u64,
  pub query_ms: u64,
  /// Database plus side files / 数据库及附属文件
  pub db_bytes: u64,
  /// Per-query or per-worker latencies / 单次查询或单个 worker 的延迟
  pub latency: Option<LatencyStats>,
}

impl BenchResult {
  pub fn new(
    bench: impl Into<String>,
    driver: impl Into<String>,
    insert: Duration,
    query: Duration,
    db_bytes: u64,
  ) -> Self {
    Self {
      bench: bench.into(),
      driver: driver.into(),
      insert_ms: insert.as_millis() as u64,
      query_ms: query.as_millis() as u64,
      db_bytes,
      latency: None,
    }
  }

  /// Attach latency stats / 附加延迟统计
  pub fn latency(mut self, latency: Option<LatencyStats>) -> Self {
    self.latency = latency;
    self
  }

  /// Value reported for a phase / 阶段对应的数值
  pub fn value(&self, phase: Phase) -> u64 {
    match phase {
      Phase::Insert => self.insert_ms,
      Phase::Query => self.query_ms,
      Phase::DbSize => self.db_bytes,
    }
  }

  /// Single metrics line / 单行指标
  pub fn line(&self, phase: Phase) -> String {
    format!(
      "{} - {phase} - {:<10} - {:>10}",
      self.bench,
      self.driver,
      self.value(phase)
    )
  }
}

impl fmt::Display for BenchResult {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", self.line(Phase::Insert))?;
    writeln!(f, "{}", self.line(Phase::Query))?;
    write!(f, "{}", self.line(Phase::DbSize))
  }
}

/// Save results as `{dir}/{driver}.json` / 保存结果为 `{dir}/{driver}.json`
pub fn save_report(dir: &Path, driver: &str, results: &[BenchResult]) -> Result<PathBuf> {
  std::fs::create_dir_all(dir)?;
  let path = dir.join(format!("{driver}.json"));
  let json = to_string_pretty(results)?;
  std::fs::write(&path, json)?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_lines() {
    let r = BenchResult::new(
      "1_simple",
      "rusqlite",
      Duration::from_micros(1_234_900),
      Duration::from_millis(56),
      4096,
    );
    assert_eq!(
      r.line(Phase::Insert),
      "1_simple - insert - rusqlite   -       1234"
    );
    assert_eq!(
      r.line(Phase::Query),
      "1_simple - query  - rusqlite   -         56"
    );
    assert_eq!(
      r.to_string().lines().last(),
      Some("1_simple - dbsize - rusqlite   -       4096")
    );
  }

  #[test]
  fn test_save_report() {
    let dir = tempfile::tempdir().unwrap();
    let r = BenchResult::new("3_complex", "x", Duration::ZERO, Duration::ZERO, 1);
    let path = save_report(dir.path(), "x", std::slice::from_ref(&r)).unwrap();
    let back: Vec<BenchResult> = sonic_rs::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(back, vec![r]);
  }
}
