// SQLite Benchmark Data Library
// SQLite 基准测试数据库

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod clock;
mod entity;
mod error;
pub mod sql;
mod workload;

pub use clock::{bind_time, unbind_time};
pub use entity::{Article, Book, Car, Comment, Device, Keyed, Location, Plant, Profile, User};
pub use error::{Error, Result};
pub use workload::{
  ARTICLE_TEXT, Blog, COMMENT_TEXT, Fleet, blog, books, cars, concurrent_users, email, fleet,
  large_users, plant_name, plants, real_picks, simple_users,
};

/// Default random seed / 默认随机种子
pub const SEED: u64 = 42;
