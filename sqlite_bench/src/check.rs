// Result validators, every mismatch is an error
// 结果校验，任何不一致都是错误

use std::{collections::HashMap, fmt::Debug};

use gxhash::GxBuildHasher;
use sqlite_bench_data::{
  ARTICLE_TEXT, Article, Blog, Book, COMMENT_TEXT, Car, Comment, Device, Fleet, Keyed, Location,
  Plant, Profile, User,
};

use crate::{Error, Result};

/// Year of every generated timestamp / 所有生成时间戳的年份
const YEAR: i32 = 2023;

pub fn eq<T: PartialEq + Debug>(what: impl Into<String>, expected: T, actual: T) -> Result<()> {
  if expected == actual {
    return Ok(());
  }
  Err(Error::Check {
    what: what.into(),
    expected: format!("{expected:?}"),
    actual: format!("{actual:?}"),
  })
}

pub fn ensure(what: impl Into<String>, cond: bool) -> Result<()> {
  eq(what, true, cond)
}

/// Foreign keys are non-decreasing and within `1..=max`
/// 外键非递减且位于 `1..=max`
pub fn fk_order(what: &str, fks: impl IntoIterator<Item = i64>, max: i64) -> Result<()> {
  let mut last = i64::MIN;
  for (i, fk) in fks.into_iter().enumerate() {
    if !(1..=max).contains(&fk) {
      return Err(Error::Check {
        what: format!("{what}[{i}] in range"),
        expected: format!("1..={max}"),
        actual: fk.to_string(),
      });
    }
    if fk < last {
      return Err(Error::Check {
        what: format!("{what}[{i}] order"),
        expected: format!(">= {last}"),
        actual: fk.to_string(),
      });
    }
    last = fk;
  }
  Ok(())
}

/// Count, then every field by position / 先比较数量，再按位置比较每个字段
pub fn users_match(expected: &[User], actual: &[User]) -> Result<()> {
  eq("user count", expected.len(), actual.len())?;
  for (e, a) in expected.iter().zip(actual) {
    eq(format!("user {}", e.id), e, a)?;
  }
  Ok(())
}

fn articles_match(expected: &[Article], actual: &[Article], nusers: i64) -> Result<()> {
  eq("article count", expected.len(), actual.len())?;
  for (e, a) in expected.iter().zip(actual) {
    eq("article id", e.id, a.id)?;
    eq(format!("article {} created", e.id), e.created, a.created)?;
    eq(format!("article {} user_id", e.id), e.user_id, a.user_id)?;
    eq(format!("article {} text", e.id), ARTICLE_TEXT, a.text.as_str())?;
  }
  fk_order("article.user_id", actual.iter().map(|a| a.user_id), nusers)
}

fn comments_match(expected: &[Comment], actual: &[Comment], narticles: i64) -> Result<()> {
  eq("comment count", expected.len(), actual.len())?;
  for (e, a) in expected.iter().zip(actual) {
    eq("comment id", e.id, a.id)?;
    eq(format!("comment {} created", e.id), e.created, a.created)?;
    eq(format!("comment {} article_id", e.id), e.article_id, a.article_id)?;
    eq(format!("comment {} text", e.id), COMMENT_TEXT, a.text.as_str())?;
  }
  fk_order(
    "comment.article_id",
    actual.iter().map(|c| c.article_id),
    narticles,
  )
}

/// Whole blog read back through the wide join / 通过宽连接读回的整个博客
pub fn blog_matches(
  blog: &Blog,
  users: &[User],
  articles: &[Article],
  comments: &[Comment],
) -> Result<()> {
  users_match(&blog.users, users)?;
  articles_match(&blog.articles, articles, blog.users.len() as i64)?;
  comments_match(&blog.comments, comments, blog.articles.len() as i64)
}

/// One user's thread read back through the filtered join
/// 通过过滤连接读回的单个用户线程
pub fn thread_matches(
  blog: &Blog,
  user_id: i64,
  users: &[User],
  articles: &[Article],
  comments: &[Comment],
) -> Result<()> {
  let Some((user, want_articles, want_comments)) = blog.thread(user_id) else {
    return Err(Error::Check {
      what: "queried user".into(),
      expected: format!("1..={}", blog.users.len()),
      actual: user_id.to_string(),
    });
  };
  users_match(std::slice::from_ref(user), users)?;
  articles_match(want_articles, articles, blog.users.len() as i64)?;
  comments_match(want_comments, comments, blog.articles.len() as i64)
}

/// Rows of the large workload: `size` bytes of `a` per email
/// large 工作负载的行：每个邮箱为 `size` 个 `a`
pub fn large_users_ok(n: usize, size: usize, users: &[User]) -> Result<()> {
  eq("user count", n, users.len())?;
  for (i, u) in users.iter().enumerate() {
    eq("user id", i as i64 + 1, u.id)?;
    eq(format!("user {} year", u.id), YEAR, u.created.year())?;
    eq(format!("user {} email len", u.id), size, u.email.len())?;
    ensure(
      format!("user {} email starts with a", u.id),
      size == 0 || u.email.starts_with('a'),
    )?;
    ensure(format!("user {} active", u.id), u.active)?;
  }
  Ok(())
}

/// Rows seen by one concurrent reader / 单个并发读取者看到的行
pub fn concurrent_users_ok(n: usize, users: &[User]) -> Result<()> {
  eq("user count", n, users.len())?;
  for (i, u) in users.iter().enumerate() {
    eq("user id", i as i64 + 1, u.id)?;
    eq(format!("user {} year", u.id), YEAR, u.created.year())?;
    ensure(
      format!("user {} email starts with user", u.id),
      u.email.starts_with("user"),
    )?;
    ensure(format!("user {} active", u.id), u.active)?;
  }
  Ok(())
}

fn index<T: Keyed>(items: &[T]) -> HashMap<T::Key, &T, GxBuildHasher> {
  let mut map = HashMap::with_capacity_and_hasher(items.len(), GxBuildHasher::default());
  for item in items {
    map.insert(item.key(), item);
  }
  map
}

fn keyed_match<T: Keyed<Key = String> + PartialEq + Debug>(
  kind: &str,
  expected: &[T],
  actual: &[T],
) -> Result<()> {
  eq(format!("{kind} count"), expected.len(), actual.len())?;
  let want = index(expected);
  for a in actual {
    match want.get(&a.key()) {
      Some(e) => eq(format!("{kind} {}", a.key()), *e, a)?,
      None => {
        return Err(Error::Check {
          what: format!("{kind} id"),
          expected: "generated id".into(),
          actual: a.key(),
        });
      }
    }
  }
  Ok(())
}

/// Fleet read back through the location join / 通过位置连接读回的车队
pub fn fleet_matches(
  fleet: &Fleet,
  profiles: &[Profile],
  devices: &[Device],
  locations: &[Location],
) -> Result<()> {
  keyed_match("profile", &fleet.profiles, profiles)?;
  keyed_match("device", &fleet.devices, devices)?;
  keyed_match("location", &fleet.locations, locations)?;

  let seen_profiles = index(profiles);
  for d in devices {
    ensure(
      format!("device {} profile observed", d.id),
      seen_profiles.contains_key(&d.profile_id),
    )?;
  }
  let seen_devices = index(devices);
  for l in locations {
    ensure(
      format!("location {} device observed", l.id),
      seen_devices.contains_key(&l.device_id),
    )?;
  }
  Ok(())
}

pub fn cars_match(expected: &[Car], actual: &[Car]) -> Result<()> {
  eq("car count", expected.len(), actual.len())?;
  for (e, a) in expected.iter().zip(actual) {
    eq(format!("car {}", e.id), e, a)?;
  }
  Ok(())
}

/// Plants, names at least `name_len` bytes / 植物名称至少 `name_len` 字节
pub fn plants_ok(n: usize, name_len: usize, plants: &[Plant]) -> Result<()> {
  eq("plant count", n, plants.len())?;
  for (i, p) in plants.iter().enumerate() {
    eq("plant id", i as i64 + 1, p.id)?;
    ensure(format!("plant {} name len", p.id), p.name.len() >= name_len)?;
  }
  Ok(())
}

pub fn books_ok(n: usize, books: &[Book]) -> Result<()> {
  eq("book count", n, books.len())?;
  for (i, b) in books.iter().enumerate() {
    eq("book id", i as i64 + 1, b.id)?;
    eq(format!("book {} name", b.id), format!("Book {}", b.id), b.name.clone())?;
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use sqlite_bench_data::{blog, concurrent_users, fleet, large_users, simple_users};

  use super::*;

  fn is_check(r: Result<()>) -> bool {
    matches!(r, Err(Error::Check { .. }))
  }

  #[test]
  fn test_users_match() {
    let users = simple_users(10);
    assert!(users_match(&users, &users).is_ok());
    assert!(is_check(users_match(&users, &users[..9])));
    let mut bad = users.clone();
    bad[3].email = "x".into();
    assert!(is_check(users_match(&users, &bad)));
  }

  #[test]
  fn test_fk_order() {
    assert!(fk_order("fk", [1, 1, 2, 3], 3).is_ok());
    assert!(is_check(fk_order("fk", [1, 3, 2], 3)));
    assert!(is_check(fk_order("fk", [0, 1], 3)));
    assert!(is_check(fk_order("fk", [1, 4], 3)));
  }

  #[test]
  fn test_blog_matches() {
    let b = blog(4, 3, 2);
    assert!(blog_matches(&b, &b.users, &b.articles, &b.comments).is_ok());

    let mut articles = b.articles.clone();
    articles.swap(0, 5);
    assert!(is_check(blog_matches(&b, &b.users, &articles, &b.comments)));

    let mut comments = b.comments.clone();
    comments[1].article_id = 13;
    assert!(is_check(blog_matches(&b, &b.users, &b.articles, &comments)));
  }

  #[test]
  fn test_blog_rejects_wrong_parent() {
    let b = blog(3, 2, 2);

    // Still in range and non-decreasing, but not the generated parent
    // 仍在范围内且非递减，但不是生成时的父记录
    let mut articles = b.articles.clone();
    for a in &mut articles {
      a.user_id = 1;
    }
    assert!(is_check(blog_matches(&b, &b.users, &articles, &b.comments)));

    let mut comments = b.comments.clone();
    for c in &mut comments {
      c.article_id = 1;
    }
    assert!(is_check(blog_matches(&b, &b.users, &b.articles, &comments)));

    let mut comments = b.comments.clone();
    comments[2].article_id = 1;
    assert!(is_check(blog_matches(&b, &b.users, &b.articles, &comments)));
  }

  #[test]
  fn test_thread_matches() {
    let b = blog(3, 2, 2);
    let (u, a, c) = b.thread(2).unwrap();
    let users = vec![u.clone()];
    assert!(thread_matches(&b, 2, &users, a, c).is_ok());
    assert!(is_check(thread_matches(&b, 3, &users, a, c)));
    assert!(is_check(thread_matches(&b, 9, &users, a, c)));

    let mut wrong = c.to_vec();
    wrong[0].article_id = 1;
    assert!(is_check(thread_matches(&b, 2, &users, a, &wrong)));
  }

  #[test]
  fn test_large_and_concurrent() {
    let users = large_users(5, 100);
    assert!(large_users_ok(5, 100, &users).is_ok());
    assert!(is_check(large_users_ok(5, 101, &users)));
    let users = concurrent_users(5);
    assert!(concurrent_users_ok(5, &users).is_ok());
    assert!(is_check(concurrent_users_ok(4, &users)));
  }

  #[test]
  fn test_fleet_matches() {
    let f = fleet(2, 2, 2);
    assert!(fleet_matches(&f, &f.profiles, &f.devices, &f.locations).is_ok());
    let mut devices = f.devices.clone();
    devices[0].name = "Other".into();
    assert!(is_check(fleet_matches(&f, &f.profiles, &devices, &f.locations)));
    assert!(is_check(fleet_matches(&f, &f.profiles[..1], &f.devices, &f.locations)));
  }
}
