// SQL text shared by every driver
// 所有驱动共用的 SQL 文本

/// Blog schema with connection settings / 博客表结构及连接设置
pub const SCHEMA: &[&str] = &[
  "PRAGMA journal_mode=DELETE",
  "PRAGMA synchronous=FULL",
  "PRAGMA foreign_keys=1",
  // 5s busy timeout / 5 秒忙等待
  "PRAGMA busy_timeout=5000",
  "CREATE TABLE users (\
   id INTEGER PRIMARY KEY NOT NULL,\
   created INTEGER NOT NULL,\
   email TEXT NOT NULL,\
   active INTEGER NOT NULL)",
  "CREATE INDEX users_created ON users(created)",
  "CREATE TABLE articles (\
   id INTEGER PRIMARY KEY NOT NULL,\
   created INTEGER NOT NULL,\
   userId INTEGER NOT NULL REFERENCES users(id),\
   text TEXT NOT NULL)",
  "CREATE INDEX articles_created ON articles(created)",
  "CREATE INDEX articles_userId ON articles(userId)",
  "CREATE TABLE comments (\
   id INTEGER PRIMARY KEY NOT NULL,\
   created INTEGER NOT NULL,\
   articleId INTEGER NOT NULL REFERENCES articles(id),\
   text TEXT NOT NULL)",
  "CREATE INDEX comments_created ON comments(created)",
  "CREATE INDEX comments_articleId ON comments(articleId)",
];

/// Settings for additional reader connections / 额外读连接的设置
pub const READER_PRAGMAS: &[&str] = &["PRAGMA foreign_keys=1", "PRAGMA busy_timeout=5000"];

pub const INSERT_USERS: &str = "INSERT INTO users(id,created,email,active) VALUES(?,?,?,?)";
pub const INSERT_ARTICLES: &str = "INSERT INTO articles(id,created,userId,text) VALUES(?,?,?,?)";
pub const INSERT_COMMENTS: &str =
  "INSERT INTO comments(id,created,articleId,text) VALUES(?,?,?,?)";

pub const SELECT_USERS: &str = "SELECT id,created,email,active FROM users ORDER BY id";

/// Wide join, one row per comment / 宽连接，每条评论一行
pub const SELECT_USERS_ARTICLES_COMMENTS: &str = "SELECT \
  users.id, users.created, users.email, users.active, \
  articles.id, articles.created, articles.userId, articles.text, \
  comments.id, comments.created, comments.articleId, comments.text \
  FROM users \
  LEFT JOIN articles ON articles.userId = users.id \
  LEFT JOIN comments ON comments.articleId = articles.id \
  ORDER BY users.created, articles.created, comments.created";

/// Wide join of one user, bound to `?1 = users.id`
/// 单个用户的宽连接，`?1 = users.id`
pub const SELECT_USER_ARTICLES_COMMENTS: &str = "SELECT \
  users.id, users.created, users.email, users.active, \
  articles.id, articles.created, articles.userId, articles.text, \
  comments.id, comments.created, comments.articleId, comments.text \
  FROM users \
  LEFT JOIN articles ON articles.userId = users.id \
  LEFT JOIN comments ON comments.articleId = articles.id \
  WHERE users.id = ? \
  ORDER BY users.created, articles.created, comments.created";

pub const FLEET_SCHEMA: &[&str] = &[
  "PRAGMA foreign_keys=1",
  "PRAGMA busy_timeout=5000",
  "CREATE TABLE profiles (id VARCHAR PRIMARY KEY NOT NULL, name VARCHAR NOT NULL, active BOOL NOT NULL)",
  "CREATE INDEX idx_profiles_name ON profiles(name)",
  "CREATE INDEX idx_profiles_active ON profiles(active)",
  "CREATE TABLE devices (id VARCHAR PRIMARY KEY NOT NULL, profileId VARCHAR NOT NULL, name VARCHAR NOT NULL, active BOOL NOT NULL, FOREIGN KEY (profileId) REFERENCES profiles(id))",
  "CREATE INDEX idx_devices_profileId ON devices(profileId)",
  "CREATE INDEX idx_devices_name ON devices(name)",
  "CREATE INDEX idx_devices_active ON devices(active)",
  "CREATE TABLE locations (id VARCHAR PRIMARY KEY NOT NULL, deviceId VARCHAR NOT NULL, name VARCHAR NOT NULL, active BOOL NOT NULL, FOREIGN KEY (deviceId) REFERENCES devices(id))",
  "CREATE INDEX idx_locations_deviceId ON locations(deviceId)",
  "CREATE INDEX idx_locations_name ON locations(name)",
  "CREATE INDEX idx_locations_active ON locations(active)",
];

pub const INSERT_PROFILES: &str = "INSERT INTO profiles (id, name, active) VALUES (?, ?, ?)";
pub const INSERT_DEVICES: &str =
  "INSERT INTO devices (id, profileId, name, active) VALUES (?, ?, ?, ?)";
pub const INSERT_LOCATIONS: &str =
  "INSERT INTO locations (id, deviceId, name, active) VALUES (?, ?, ?, ?)";

/// Location → device → profile join, bound to two `active` values
/// 位置 → 设备 → 档案连接，绑定两个 active 值
pub const SELECT_FLEET: &str = "SELECT \
  locations.id, locations.deviceId, locations.name, locations.active, \
  devices.id, devices.profileId, devices.name, devices.active, \
  profiles.id, profiles.name, profiles.active \
  FROM locations \
  LEFT JOIN devices ON devices.id = locations.deviceId \
  LEFT JOIN profiles ON profiles.id = devices.profileId \
  WHERE locations.active = ? OR locations.active = ? \
  ORDER BY locations.name, locations.id, devices.name, devices.id, profiles.name, profiles.id";

pub const CARS_SCHEMA: &[&str] =
  &["CREATE TABLE cars (id INTEGER PRIMARY KEY NOT NULL, company VARCHAR, model VARCHAR)"];
pub const INSERT_CARS: &str = "INSERT INTO cars (id, company, model) VALUES (?, ?, ?)";
pub const SELECT_CARS: &str = "SELECT id, company, model FROM cars ORDER BY id";

pub const PLANTS_SCHEMA: &[&str] =
  &["CREATE TABLE plants (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR)"];
pub const INSERT_PLANTS: &str = "INSERT INTO plants (id, name) VALUES (?, ?)";
pub const SELECT_PLANTS: &str = "SELECT id, name FROM plants ORDER BY id";

pub const BOOKS_SCHEMA: &[&str] = &[
  "PRAGMA busy_timeout=5000",
  "CREATE TABLE books (id INTEGER PRIMARY KEY NOT NULL, name VARCHAR)",
];
pub const INSERT_BOOKS: &str = "INSERT INTO books (id,name) VALUES (?,?)";
pub const SELECT_BOOKS: &str = "SELECT id, name FROM books ORDER BY id";
