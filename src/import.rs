//! Reading flag definitions from a `flag,team,channel_id` CSV file.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use crate::dal::{self, flag::LoadSummary, Db};
use crate::models::NewFlag;

/// Parses header-less `flag,team,channel_id` rows. Rows that don't parse are
/// logged and left out.
pub fn parse_flags(reader: impl io::Read) -> Vec<NewFlag> {
  let mut reader = csv::ReaderBuilder::new()
    .has_headers(false)
    .trim(csv::Trim::All)
    .from_reader(reader);

  reader
    .deserialize::<NewFlag>()
    .enumerate()
    .filter_map(|(idx, row)| match row {
      Ok(flag) => Some(flag),
      Err(err) => {
        warn!("skipping malformed flag row {}: {}", idx + 1, err);
        None
      }
    })
    .collect()
}

pub fn read_flags(path: impl AsRef<Path>) -> Result<Vec<NewFlag>> {
  let path = path.as_ref();
  let file = std::fs::File::open(path)
    .with_context(|| format!("couldn't open flags file {}", path.display()))?;
  Ok(parse_flags(file))
}

/// Reads `path` and loads every flag in it into the store.
pub async fn import_flags(
  db: &Db,
  path: impl AsRef<Path>,
) -> Result<LoadSummary> {
  let path = path.as_ref();
  let flags = read_flags(path)?;
  let summary = dal::flag::bulk_load(db, &flags).await?;
  info!(
    "imported flags from {}: {} new, {} already present, {} failed",
    path.display(),
    summary.inserted,
    summary.skipped,
    summary.failed
  );
  Ok(summary)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::dal::testing;
  use crate::models::{ChannelId, TeamId};

  #[test]
  fn parses_rows_in_order() {
    let data = "abc,1,100\n def , 2 , 200 \n";
    let flags = parse_flags(data.as_bytes());
    assert_eq!(
      flags,
      vec![
        NewFlag {
          flag: "abc".to_owned(),
          team: TeamId(1),
          channel_id: ChannelId(100),
        },
        NewFlag {
          flag: "def".to_owned(),
          team: TeamId(2),
          channel_id: ChannelId(200),
        },
      ]
    );
  }

  #[test]
  fn skips_malformed_rows() {
    let data = "abc,1,100\nno-team,,5\nshort,3\nxyz,four,400\nlast,4,400\n";
    let flags = parse_flags(data.as_bytes());
    let names = flags.iter().map(|f| f.flag.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["abc", "last"]);
  }

  #[tokio::test]
  async fn imports_file_idempotently() {
    let (dir, db) = testing::db().await;
    let path = dir.path().join("flags.csv");
    std::fs::write(&path, "A,1,11\nB,2,22\nbroken\n").unwrap();

    let first = import_flags(&db, &path).await.unwrap();
    assert_eq!(first.inserted, 2);

    let second = import_flags(&db, &path).await.unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.skipped, 2);
  }

  #[tokio::test]
  async fn missing_file_is_an_error() {
    let (dir, db) = testing::db().await;
    assert!(import_flags(&db, dir.path().join("nope.csv")).await.is_err());
  }
}
