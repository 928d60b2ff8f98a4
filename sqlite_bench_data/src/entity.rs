// Entity records written and read by the benchmarks
// 基准测试写入和读取的实体记录

use std::hash::Hash;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Record with a primary key, used to de-duplicate join fan-out
/// 带主键的记录，用于对 JOIN 扇出去重
pub trait Keyed {
  type Key: Hash + Eq + Clone;

  fn key(&self) -> Self::Key;
}

/// Registered user of the blog / 博客注册用户
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: i64,
  pub created: OffsetDateTime,
  pub email: String,
  pub active: bool,
}

impl User {
  pub fn new(id: i64, created: OffsetDateTime, email: impl Into<String>, active: bool) -> Self {
    Self {
      id,
      created,
      email: email.into(),
      active,
    }
  }
}

/// Article written by a user / 用户撰写的文章
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
  pub id: i64,
  pub created: OffsetDateTime,
  /// Author / 作者
  pub user_id: i64,
  pub text: String,
}

impl Article {
  pub fn new(id: i64, created: OffsetDateTime, user_id: i64, text: impl Into<String>) -> Self {
    Self {
      id,
      created,
      user_id,
      text: text.into(),
    }
  }
}

/// Comment on an article / 文章评论
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
  pub id: i64,
  pub created: OffsetDateTime,
  pub article_id: i64,
  pub text: String,
}

impl Comment {
  pub fn new(id: i64, created: OffsetDateTime, article_id: i64, text: impl Into<String>) -> Self {
    Self {
      id,
      created,
      article_id,
      text: text.into(),
    }
  }
}

/// Owner of devices / 设备所有者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub id: String,
  pub name: String,
  pub active: bool,
}

/// Device of a profile / 档案下的设备
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
  pub id: String,
  pub profile_id: String,
  pub name: String,
  pub active: bool,
}

/// Location reported by a device / 设备上报的位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
  pub id: String,
  pub device_id: String,
  pub name: String,
  pub active: bool,
}

/// Flat row with two short texts / 含两个短文本的扁平行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
  pub id: i64,
  pub company: String,
  pub model: String,
}

/// Flat row with one long name / 含一个长名称的扁平行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plant {
  pub id: i64,
  pub name: String,
}

/// Flat row read by parallel readers / 并行读取的扁平行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
  pub id: i64,
  pub name: String,
}

macro_rules! keyed {
  ($key:ty => $($t:ty),+) => {
    $(
      impl Keyed for $t {
        type Key = $key;

        #[inline]
        fn key(&self) -> $key {
          self.id.clone()
        }
      }
    )+
  };
}

keyed!(i64 => User, Article, Comment);
keyed!(String => Profile, Device, Location);
