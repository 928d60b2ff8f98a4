// First-seen de-duplication of join fan-out
// 按首次出现顺序对 JOIN 扇出去重

use std::collections::HashSet;

use gxhash::GxBuildHasher;
use sqlite_bench_data::Keyed;

/// Collects entities once per primary key, keeping first-seen order
/// 每个主键只收集一次实体，保持首次出现的顺序
pub struct Dedup<T: Keyed> {
  items: Vec<T>,
  seen: HashSet<T::Key, GxBuildHasher>,
}

impl<T: Keyed> Default for Dedup<T> {
  fn default() -> Self {
    Self {
      items: Vec::new(),
      seen: HashSet::with_hasher(GxBuildHasher::default()),
    }
  }
}

impl<T: Keyed> Dedup<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Push unless the LEFT JOIN produced no row, building the item only for
  /// unseen keys
  /// 除非 LEFT JOIN 未产生行，否则加入；仅对未见过的主键构建条目
  pub fn push_with<E>(
    &mut self,
    key: Option<T::Key>,
    build: impl FnOnce() -> Result<T, E>,
  ) -> Result<(), E> {
    if let Some(key) = key
      && !self.seen.contains(&key)
    {
      self.seen.insert(key);
      self.items.push(build()?);
    }
    Ok(())
  }

  pub fn into_vec(self) -> Vec<T> {
    self.items
  }
}

#[cfg(test)]
mod tests {
  use sqlite_bench_data::{Article, User, clock::BASE};

  use super::*;

  fn add<T: Keyed>(d: &mut Dedup<T>, item: T) {
    d.push_with::<()>(Some(item.key()), || Ok(item)).unwrap();
  }

  #[test]
  fn test_fan_out() {
    // 3 parents × 4 children, parent repeated per child row
    // 3 个父记录 × 4 个子记录，父记录随每个子行重复
    let (p, c) = (3i64, 4i64);
    let mut users = Dedup::new();
    let mut articles = Dedup::new();
    for parent in 1..=p {
      for child in 1..=c {
        add(&mut users, User::new(parent, BASE, "u", true));
        add(
          &mut articles,
          Article::new((parent - 1) * c + child, BASE, parent, "a"),
        );
      }
    }
    let users = users.into_vec();
    assert_eq!(users.len(), p as usize);
    assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2, 3]);
    assert_eq!(articles.into_vec().len(), (p * c) as usize);
  }

  #[test]
  fn test_first_seen_wins() {
    let mut d = Dedup::new();
    add(&mut d, User::new(2, BASE, "first", true));
    add(&mut d, User::new(2, BASE, "second", false));
    add(&mut d, User::new(1, BASE, "x", true));
    let v = d.into_vec();
    assert_eq!(v.len(), 2);
    assert_eq!(v[0].email, "first");
    assert_eq!(v[1].id, 1);
  }

  #[test]
  fn test_push_with_skips_seen() {
    let mut d: Dedup<User> = Dedup::new();
    let mut built = 0;
    for _ in 0..3 {
      d.push_with::<()>(Some(7), || {
        built += 1;
        Ok(User::new(7, BASE, "u", true))
      })
      .unwrap();
    }
    d.push_with::<()>(None, || unreachable!()).unwrap();
    assert_eq!(built, 1);
    assert_eq!(d.into_vec().len(), 1);
  }

  #[test]
  fn test_build_error_propagates() {
    let mut d: Dedup<User> = Dedup::new();
    assert_eq!(d.push_with(Some(1), || Err("bad row")), Err("bad row"));
  }
}
