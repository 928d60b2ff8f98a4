// Driver adapter trait for unified benchmarking
// 统一的驱动适配器 trait

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use sqlite_bench_data::{Article, Book, Car, Comment, Device, Location, Plant, Profile, User};

use crate::{Error, Result};

/// Suffixes of files SQLite keeps next to the database
/// SQLite 在数据库旁维护的附属文件后缀
const SIDE_SUFFIXES: [&str; 3] = ["-journal", "-wal", "-shm"];

/// Database file followed by its journal, wal and shm files
/// 数据库文件及其 journal、wal、shm 文件
pub fn db_files(path: &Path) -> [PathBuf; 4] {
  let side = |suffix: &str| {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
  };
  [
    path.to_path_buf(),
    side(SIDE_SUFFIXES[0]),
    side(SIDE_SUFFIXES[1]),
    side(SIDE_SUFFIXES[2]),
  ]
}

/// Delete database and side files, then verify they are gone
/// 删除数据库及附属文件，并确认已不存在
pub fn remove_db_files(path: &Path) -> Result<()> {
  for file in db_files(path) {
    match std::fs::remove_file(&file) {
      Ok(()) => {}
      Err(e) if e.kind() == ErrorKind::NotFound => {}
      Err(e) => return Err(e.into()),
    }
    if file.try_exists()? {
      return Err(Error::DbFileRemains(file));
    }
  }
  Ok(())
}

/// Sum of database and side file sizes, missing files count zero
/// 数据库及附属文件大小之和，缺失文件计为零
pub fn db_size(path: &Path) -> u64 {
  db_files(path)
    .iter()
    .filter_map(|f| std::fs::metadata(f).ok())
    .map(|m| m.len())
    .sum()
}

/// Positional query parameter / 位置查询参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
  Int(i64),
  Bool(bool),
}

/// Rows of a users ⟕ articles ⟕ comments join / users ⟕ articles ⟕ comments 连接结果
pub type UsersArticlesComments = (Vec<User>, Vec<Article>, Vec<Comment>);

/// Rows of a locations ⟕ devices ⟕ profiles join / locations ⟕ devices ⟕ profiles 连接结果
pub type FleetRows = (Vec<Profile>, Vec<Device>, Vec<Location>);

/// Unified SQLite driver adapter / 统一 SQLite 驱动适配器
///
/// One value owns one connection. Inserts never open a transaction of their
/// own, the runner brackets them with `begin` / `commit`. Join reads return
/// each entity once, in first-seen order.
/// 一个值持有一个连接。插入不自行开启事务，由 runner 用 `begin` / `commit` 包裹。
/// 连接查询中每个实体只返回一次，保持首次出现的顺序。
pub trait BenchDb: Sized + Send {
  /// Open or create the database file / 打开或创建数据库文件
  fn open(path: &Path) -> Result<Self>;

  /// Driver name / 驱动名称
  fn name(&self) -> &str;

  /// Run statements one by one outside any transaction
  /// 在事务外逐条执行语句
  fn exec(&mut self, sqls: &[&str]) -> Result<()>;

  /// Start a write transaction / 开启写事务
  fn begin(&mut self) -> Result<()>;

  /// Commit the open transaction / 提交当前事务
  fn commit(&mut self) -> Result<()>;

  /// Columns: id, created, email, active / 列：id、created、email、active
  fn insert_users(&mut self, sql: &str, users: &[User]) -> Result<()>;

  /// Columns: id, created, user id, text / 列：id、created、用户 id、text
  fn insert_articles(&mut self, sql: &str, articles: &[Article]) -> Result<()>;

  /// Columns: id, created, article id, text / 列：id、created、文章 id、text
  fn insert_comments(&mut self, sql: &str, comments: &[Comment]) -> Result<()>;

  /// All users, in the order the query returns them / 按查询返回顺序的全部用户
  fn find_users(&mut self, sql: &str) -> Result<Vec<User>>;

  /// Columns: 4 of users, 4 of articles, 4 of comments
  /// 列：users 4 列、articles 4 列、comments 4 列
  fn find_users_articles_comments(
    &mut self,
    sql: &str,
    params: &[Param],
  ) -> Result<UsersArticlesComments>;

  /// Columns: id, name, active / 列：id、name、active
  fn insert_profiles(&mut self, sql: &str, profiles: &[Profile]) -> Result<()>;

  /// Columns: id, profile id, name, active / 列：id、档案 id、name、active
  fn insert_devices(&mut self, sql: &str, devices: &[Device]) -> Result<()>;

  /// Columns: id, device id, name, active / 列：id、设备 id、name、active
  fn insert_locations(&mut self, sql: &str, locations: &[Location]) -> Result<()>;

  /// Columns: 4 of locations, 4 of devices, 3 of profiles
  /// 列：locations 4 列、devices 4 列、profiles 3 列
  fn find_fleet(&mut self, sql: &str, params: &[Param]) -> Result<FleetRows>;

  /// Columns: id, company, model / 列：id、company、model
  fn insert_cars(&mut self, sql: &str, cars: &[Car]) -> Result<()>;

  /// Rows of `sql`, columns as inserted / `sql` 的结果行，列同插入
  fn find_cars(&mut self, sql: &str) -> Result<Vec<Car>>;

  /// Columns: id, name / 列：id、name
  fn insert_plants(&mut self, sql: &str, plants: &[Plant]) -> Result<()>;

  /// Rows of `sql`, columns as inserted / `sql` 的结果行，列同插入
  fn find_plants(&mut self, sql: &str) -> Result<Vec<Plant>>;

  /// Columns: id, name / 列：id、name
  fn insert_books(&mut self, sql: &str, books: &[Book]) -> Result<()>;

  /// Rows of `sql`, columns as inserted / `sql` 的结果行，列同插入
  fn find_books(&mut self, sql: &str) -> Result<Vec<Book>>;

  /// Release the connection / 释放连接
  fn close(self) -> Result<()>;
}
