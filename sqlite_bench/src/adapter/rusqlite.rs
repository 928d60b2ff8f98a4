// rusqlite adapter / rusqlite 适配器

use std::path::Path;

use rusqlite::{
  Connection, Row, ToSql, params, params_from_iter,
  types::ToSqlOutput,
};
use sqlite_bench_data::{
  Article, Book, Car, Comment, Device, Location, Plant, Profile, User, bind_time, unbind_time,
};

use crate::{BenchDb, Dedup, FleetRows, Param, Result, UsersArticlesComments};

const DRIVER_NAME: &str = "rusqlite";

/// Prepared statements kept per connection / 每个连接缓存的预编译语句数
const STMT_CACHE: usize = 32;

impl ToSql for Param {
  fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
    Ok(match self {
      Param::Int(v) => ToSqlOutput::from(*v),
      Param::Bool(v) => ToSqlOutput::from(*v),
    })
  }
}

/// rusqlite adapter / rusqlite 适配器
pub struct RusqliteDb {
  conn: Connection,
}

impl RusqliteDb {
  fn user(row: &Row, at: usize) -> Result<User> {
    Ok(User::new(
      row.get(at)?,
      unbind_time(row.get(at + 1)?)?,
      row.get::<_, String>(at + 2)?,
      row.get(at + 3)?,
    ))
  }

  fn article(row: &Row, at: usize) -> Result<Article> {
    Ok(Article::new(
      row.get(at)?,
      unbind_time(row.get(at + 1)?)?,
      row.get(at + 2)?,
      row.get::<_, String>(at + 3)?,
    ))
  }

  fn comment(row: &Row, at: usize) -> Result<Comment> {
    Ok(Comment::new(
      row.get(at)?,
      unbind_time(row.get(at + 1)?)?,
      row.get(at + 2)?,
      row.get::<_, String>(at + 3)?,
    ))
  }
}

impl BenchDb for RusqliteDb {
  fn open(path: &Path) -> Result<Self> {
    let conn = Connection::open(path)?;
    conn.set_prepared_statement_cache_capacity(STMT_CACHE);
    Ok(Self { conn })
  }

  fn name(&self) -> &str {
    DRIVER_NAME
  }

  fn exec(&mut self, sqls: &[&str]) -> Result<()> {
    for sql in sqls {
      // PRAGMA may return a row, execute_batch discards it
      // PRAGMA 可能返回一行，execute_batch 会丢弃
      self.conn.execute_batch(sql)?;
    }
    Ok(())
  }

  fn begin(&mut self) -> Result<()> {
    self.conn.execute_batch("BEGIN")?;
    Ok(())
  }

  fn commit(&mut self) -> Result<()> {
    self.conn.execute_batch("COMMIT")?;
    Ok(())
  }

  fn insert_users(&mut self, sql: &str, users: &[User]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for u in users {
      stmt.execute(params![u.id, bind_time(u.created), u.email, u.active])?;
    }
    Ok(())
  }

  fn insert_articles(&mut self, sql: &str, articles: &[Article]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for a in articles {
      stmt.execute(params![a.id, bind_time(a.created), a.user_id, a.text])?;
    }
    Ok(())
  }

  fn insert_comments(&mut self, sql: &str, comments: &[Comment]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for c in comments {
      stmt.execute(params![c.id, bind_time(c.created), c.article_id, c.text])?;
    }
    Ok(())
  }

  fn find_users(&mut self, sql: &str) -> Result<Vec<User>> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    let mut rows = stmt.query([])?;
    let mut users = Vec::new();
    while let Some(row) = rows.next()? {
      users.push(Self::user(row, 0)?);
    }
    Ok(users)
  }

  fn find_users_articles_comments(
    &mut self,
    sql: &str,
    params: &[Param],
  ) -> Result<UsersArticlesComments> {
    let mut users: Dedup<User> = Dedup::new();
    let mut articles: Dedup<Article> = Dedup::new();
    let mut comments: Dedup<Comment> = Dedup::new();

    let mut stmt = self.conn.prepare_cached(sql)?;
    let mut rows = stmt.query(params_from_iter(params))?;
    while let Some(row) = rows.next()? {
      users.push_with(row.get(0)?, || Self::user(row, 0))?;
      articles.push_with(row.get(4)?, || Self::article(row, 4))?;
      comments.push_with(row.get(8)?, || Self::comment(row, 8))?;
    }
    Ok((users.into_vec(), articles.into_vec(), comments.into_vec()))
  }

  fn insert_profiles(&mut self, sql: &str, profiles: &[Profile]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for p in profiles {
      stmt.execute(params![p.id, p.name, p.active])?;
    }
    Ok(())
  }

  fn insert_devices(&mut self, sql: &str, devices: &[Device]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for d in devices {
      stmt.execute(params![d.id, d.profile_id, d.name, d.active])?;
    }
    Ok(())
  }

  fn insert_locations(&mut self, sql: &str, locations: &[Location]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for l in locations {
      stmt.execute(params![l.id, l.device_id, l.name, l.active])?;
    }
    Ok(())
  }

  fn find_fleet(&mut self, sql: &str, params: &[Param]) -> Result<FleetRows> {
    let mut profiles: Dedup<Profile> = Dedup::new();
    let mut devices: Dedup<Device> = Dedup::new();
    let mut locations: Dedup<Location> = Dedup::new();

    let mut stmt = self.conn.prepare_cached(sql)?;
    let mut rows = stmt.query(params_from_iter(params))?;
    while let Some(row) = rows.next()? {
      locations.push_with(row.get(0)?, || -> Result<_> {
        Ok(Location {
          id: row.get(0)?,
          device_id: row.get(1)?,
          name: row.get(2)?,
          active: row.get(3)?,
        })
      })?;
      devices.push_with(row.get(4)?, || -> Result<_> {
        Ok(Device {
          id: row.get(4)?,
          profile_id: row.get(5)?,
          name: row.get(6)?,
          active: row.get(7)?,
        })
      })?;
      profiles.push_with(row.get(8)?, || -> Result<_> {
        Ok(Profile {
          id: row.get(8)?,
          name: row.get(9)?,
          active: row.get(10)?,
        })
      })?;
    }
    Ok((profiles.into_vec(), devices.into_vec(), locations.into_vec()))
  }

  fn insert_cars(&mut self, sql: &str, cars: &[Car]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for c in cars {
      stmt.execute(params![c.id, c.company, c.model])?;
    }
    Ok(())
  }

  fn find_cars(&mut self, sql: &str) -> Result<Vec<Car>> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    let cars = stmt
      .query_map([], |row| {
        Ok(Car {
          id: row.get(0)?,
          company: row.get(1)?,
          model: row.get(2)?,
        })
      })?
      .collect::<rusqlite::Result<_>>()?;
    Ok(cars)
  }

  fn insert_plants(&mut self, sql: &str, plants: &[Plant]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for p in plants {
      stmt.execute(params![p.id, p.name])?;
    }
    Ok(())
  }

  fn find_plants(&mut self, sql: &str) -> Result<Vec<Plant>> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    let plants = stmt
      .query_map([], |row| {
        Ok(Plant {
          id: row.get(0)?,
          name: row.get(1)?,
        })
      })?
      .collect::<rusqlite::Result<_>>()?;
    Ok(plants)
  }

  fn insert_books(&mut self, sql: &str, books: &[Book]) -> Result<()> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    for b in books {
      stmt.execute(params![b.id, b.name])?;
    }
    Ok(())
  }

  fn find_books(&mut self, sql: &str) -> Result<Vec<Book>> {
    let mut stmt = self.conn.prepare_cached(sql)?;
    let books = stmt
      .query_map([], |row| {
        Ok(Book {
          id: row.get(0)?,
          name: row.get(1)?,
        })
      })?
      .collect::<rusqlite::Result<_>>()?;
    Ok(books)
  }

  fn close(self) -> Result<()> {
    self.conn.close().map_err(|(_, e)| e)?;
    Ok(())
  }
}
