// Latency histogram wrapper for HdrHistogram
// 延迟直方图包装器

use std::time::Duration;

use hdrhistogram::Histogram;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Max latency value: 1 hour in microseconds
/// 最大延迟值：1小时（微秒）
const MAX_LATENCY_US: u64 = 3_600_000_000;

/// Significant figures for histogram precision
/// 直方图精度的有效数字
const SIGFIG: u8 = 3;

/// Histogram of per-query latencies in microseconds
/// 单次查询延迟直方图（微秒）
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
  inner: Histogram<u64>,
}

impl LatencyHistogram {
  pub fn new() -> Result<Self> {
    let inner = Histogram::new_with_bounds(1, MAX_LATENCY_US, SIGFIG)?;
    Ok(Self { inner })
  }

  /// Record elapsed time, clamped to [1us, 1h]
  /// 记录耗时，限制在 [1us, 1h]
  pub fn record(&mut self, elapsed: Duration) {
    let us = (elapsed.as_micros() as u64).clamp(1, MAX_LATENCY_US);
    let _ = self.inner.record(us);
  }

  pub fn p50(&self) -> u64 {
    self.inner.value_at_quantile(0.50)
  }

  pub fn p99(&self) -> u64 {
    self.inner.value_at_quantile(0.99)
  }

  pub fn mean(&self) -> f64 {
    self.inner.mean()
  }

  pub fn min(&self) -> u64 {
    self.inner.min()
  }

  pub fn max(&self) -> u64 {
    self.inner.max()
  }

  pub fn count(&self) -> u64 {
    self.inner.len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  /// Snapshot, `None` when nothing was recorded / 快照，未记录时为 `None`
  pub fn stats(&self) -> Option<LatencyStats> {
    (!self.is_empty()).then(|| LatencyStats::from(self))
  }
}

/// Serializable latency stats snapshot in microseconds
/// 可序列化的延迟统计快照（微秒）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LatencyStats {
  pub min: u64,
  pub max: u64,
  pub mean: f64,
  pub p50: u64,
  pub p99: u64,
  pub count: u64,
}

impl From<&LatencyHistogram> for LatencyStats {
  fn from(h: &LatencyHistogram) -> Self {
    Self {
      min: h.min(),
      max: h.max(),
      mean: h.mean(),
      p50: h.p50(),
      p99: h.p99(),
      count: h.count(),
    }
  }
}
