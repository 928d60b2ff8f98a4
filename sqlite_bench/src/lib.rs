// SQLite Driver Benchmark Library
// SQLite 驱动性能评测库

#![cfg_attr(docsrs, feature(doc_cfg))]

mod adapter;
pub mod check;
mod dedup;
mod engine;
mod error;
mod latency;
mod metrics;
mod runner;

#[cfg(feature = "rusqlite")]
pub use adapter::rusqlite::RusqliteDb;
pub use dedup::Dedup;
pub use engine::{BenchDb, FleetRows, Param, UsersArticlesComments, db_files, db_size, remove_db_files};
pub use error::{Error, Result};
pub use latency::{LatencyHistogram, LatencyStats};
pub use metrics::{BenchResult, Phase, save_report};
pub use runner::{BenchConfig, BenchRunner, Scenario};
