//! Database abstraction layer

use std::ops::Deref;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::sqlite::{
  SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
};

pub mod aggregate;
pub mod capture;
pub mod flag;

#[derive(Debug, Clone)]
pub struct Db(pub SqlitePool);

impl Deref for Db {
  type Target = SqlitePool;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

impl Db {
  pub async fn connect(database_url: impl AsRef<str>) -> Result<Self> {
    let database_url = database_url.as_ref();
    let options = SqliteConnectOptions::from_str(database_url)
      .with_context(|| format!("invalid database url {:?}", database_url))?
      .create_if_missing(true)
      .foreign_keys(true)
      // concurrent writers wait on each other instead of failing with
      // "database is locked"
      .journal_mode(SqliteJournalMode::Wal)
      .busy_timeout(Duration::from_secs(5));
    let pool = SqlitePoolOptions::new()
      .max_connections(8)
      .connect_with(options)
      .await
      .context("could not connect to the database")?;
    Ok(Db(pool))
  }

  /// Creates the `flags` and `captures` tables if they don't exist yet.
  pub async fn initialize(&self) -> Result<()> {
    sqlx::query(
      "
      CREATE TABLE IF NOT EXISTS flags (
        flag TEXT PRIMARY KEY NOT NULL,
        team INTEGER NOT NULL,
        channel_id INTEGER NOT NULL
      )
      ",
    )
    .execute(&self.0)
    .await
    .context("could not create flags table")?;

    sqlx::query(
      "
      CREATE TABLE IF NOT EXISTS captures (
        flag TEXT NOT NULL REFERENCES flags (flag),
        team INTEGER NOT NULL,
        UNIQUE (flag, team)
      )
      ",
    )
    .execute(&self.0)
    .await
    .context("could not create captures table")?;

    Ok(())
  }
}


#[cfg(test)]
mod tests {
  use super::testing;

  #[tokio::test]
  async fn initialize_is_idempotent() {
    let (_dir, db) = testing::two_teams().await;
    db.initialize().await.unwrap();
    db.initialize().await.unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM flags")
      .fetch_one(&db.0)
      .await
      .unwrap();
    assert_eq!(count, 2);
  }
}
