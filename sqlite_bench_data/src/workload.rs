// Deterministic workload generators
// 确定性工作负载生成器
//
// Every generator is a pure function of its parameters: ids count up from 1
// in generation order and `created` is a fixed offset from `clock::BASE`.
// 每个生成器都是参数的纯函数：id 按生成顺序从 1 递增，created 为相对 `clock::BASE` 的固定偏移。

use crate::{
  Article, Book, Car, Comment, Device, Location, Plant, Profile, User,
  clock::{minutes, seconds},
};

pub const ARTICLE_TEXT: &str = "article text";
pub const COMMENT_TEXT: &str = "comment text";

/// Fill unit for plant names / 植物名称填充单元
const PLANT_NAME_UNIT: &str = "Name ";

/// Email of user `id` for the simple, many and blog workloads
/// simple、many 与 blog 工作负载中用户 `id` 的邮箱
#[inline]
pub fn email(id: i64) -> String {
  format!("user{id:08}@example.com")
}

/// Users `1..=n`, one minute apart / 用户 `1..=n`，间隔一分钟
pub fn simple_users(n: usize) -> Vec<User> {
  (0..n as i64)
    .map(|i| User::new(i + 1, minutes(i), email(i + 1), true))
    .collect()
}

/// Users whose email is `size` bytes of `a` / 邮箱为 `size` 个 `a` 的用户
pub fn large_users(n: usize, size: usize) -> Vec<User> {
  let payload = "a".repeat(size);
  (0..n as i64)
    .map(|i| User::new(i + 1, seconds(i), payload.clone(), true))
    .collect()
}

/// Users for the concurrent readers, one second apart
/// 并发读取使用的用户，间隔一秒
pub fn concurrent_users(n: usize) -> Vec<User> {
  (0..n as i64)
    .map(|i| User::new(i + 1, seconds(i), format!("user{}@example.com", i + 1), true))
    .collect()
}

/// Users → articles → comments hierarchy / 用户 → 文章 → 评论层级
#[derive(Debug, Clone, PartialEq)]
pub struct Blog {
  pub users: Vec<User>,
  pub articles: Vec<Article>,
  pub comments: Vec<Comment>,
  pub articles_per_user: usize,
  pub comments_per_article: usize,
}

impl Blog {
  /// Comments per user / 每个用户的评论数
  #[inline]
  pub fn comments_per_user(&self) -> usize {
    self.articles_per_user * self.comments_per_article
  }

  /// One user with its articles and their comments, in generation order
  /// 按生成顺序返回每个用户及其文章与评论
  pub fn threads(&self) -> impl Iterator<Item = (&User, &[Article], &[Comment])> {
    let na = self.articles_per_user;
    let nc = self.comments_per_user();
    self.users.iter().enumerate().map(move |(i, user)| {
      (
        user,
        &self.articles[i * na..(i + 1) * na],
        &self.comments[i * nc..(i + 1) * nc],
      )
    })
  }

  /// Thread of user `id` / 用户 `id` 的线程
  pub fn thread(&self, id: i64) -> Option<(&User, &[Article], &[Comment])> {
    let idx = usize::try_from(id).ok()?.checked_sub(1)?;
    self.threads().nth(idx)
  }
}

/// Build a blog where user ids, article ids and comment ids each count from 1
/// 构建博客，用户、文章、评论 id 各自从 1 计数
pub fn blog(nusers: usize, articles_per_user: usize, comments_per_article: usize) -> Blog {
  let mut users = Vec::with_capacity(nusers);
  let mut articles = Vec::with_capacity(nusers * articles_per_user);
  let mut comments = Vec::with_capacity(nusers * articles_per_user * comments_per_article);
  let mut article_id = 0i64;
  let mut comment_id = 0i64;

  for user_id in 1..=nusers as i64 {
    users.push(User::new(
      user_id,
      minutes(user_id),
      email(user_id),
      user_id % 2 == 0,
    ));
    for _ in 0..articles_per_user {
      article_id += 1;
      articles.push(Article::new(
        article_id,
        minutes(article_id),
        user_id,
        ARTICLE_TEXT,
      ));
      for _ in 0..comments_per_article {
        comment_id += 1;
        comments.push(Comment::new(
          comment_id,
          minutes(comment_id),
          article_id,
          COMMENT_TEXT,
        ));
      }
    }
  }

  Blog {
    users,
    articles,
    comments,
    articles_per_user,
    comments_per_article,
  }
}

/// Profiles → devices → locations, string keyed / 档案 → 设备 → 位置，字符串主键
#[derive(Debug, Clone, PartialEq)]
pub struct Fleet {
  pub profiles: Vec<Profile>,
  pub devices: Vec<Device>,
  pub locations: Vec<Location>,
}

/// `nprofiles` profiles, each with `ndevices` devices, each with `nlocations`
/// locations; odd indexes are active
/// `nprofiles` 个档案，每个 `ndevices` 个设备，每个设备 `nlocations` 个位置；奇数下标为活跃
pub fn fleet(nprofiles: usize, ndevices: usize, nlocations: usize) -> Fleet {
  let mut profiles = Vec::with_capacity(nprofiles);
  let mut devices = Vec::with_capacity(nprofiles * ndevices);
  let mut locations = Vec::with_capacity(nprofiles * ndevices * nlocations);

  for p in 0..nprofiles {
    let profile_id = format!("profile_{p}");
    for d in 0..ndevices {
      let device_id = format!("device_{p}_{d}");
      for l in 0..nlocations {
        locations.push(Location {
          id: format!("location_{p}_{d}_{l}"),
          device_id: device_id.clone(),
          name: format!("Location {p} {d} {l}"),
          active: l % 2 == 1,
        });
      }
      devices.push(Device {
        id: device_id,
        profile_id: profile_id.clone(),
        name: format!("Device {p} {d}"),
        active: d % 2 == 1,
      });
    }
    profiles.push(Profile {
      id: profile_id,
      name: format!("Profile {p}"),
      active: p % 2 == 1,
    });
  }

  Fleet {
    profiles,
    devices,
    locations,
  }
}

/// Cars `1..=n` / 汽车 `1..=n`
pub fn cars(n: usize) -> Vec<Car> {
  (1..=n as i64)
    .map(|id| Car {
      id,
      company: format!("Company {id}"),
      model: format!("Model {id}"),
    })
    .collect()
}

/// Plant name of at least `len` bytes / 至少 `len` 字节的植物名称
pub fn plant_name(len: usize) -> String {
  let units = len.div_ceil(PLANT_NAME_UNIT.len());
  PLANT_NAME_UNIT.repeat(units)
}

/// Plants `1..=n` sharing one name of at least `name_len` bytes
/// 植物 `1..=n`，共用一个至少 `name_len` 字节的名称
pub fn plants(n: usize, name_len: usize) -> Vec<Plant> {
  let name = plant_name(name_len);
  (1..=n as i64)
    .map(|id| Plant {
      id,
      name: name.clone(),
    })
    .collect()
}

/// Books `1..=n` named `Book {id}` / 书籍 `1..=n`，名为 `Book {id}`
pub fn books(n: usize) -> Vec<Book> {
  (1..=n as i64)
    .map(|id| Book {
      id,
      name: format!("Book {id}"),
    })
    .collect()
}

/// User ids queried by the real workload, reproducible from `seed`
/// real 工作负载查询的用户 id，可由 `seed` 重现
pub fn real_picks(nusers: usize, nqueries: usize, seed: u64) -> Vec<i64> {
  if nusers == 0 {
    return Vec::new();
  }
  let mut rng = fastrand::Rng::with_seed(seed);
  (0..nqueries).map(|_| rng.i64(1..=nusers as i64)).collect()
}
