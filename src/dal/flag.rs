use anyhow::{Context, Result};

use crate::models::{Flag, NewFlag};

use super::Db;

/// What happened to the records passed to [`bulk_load`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadSummary {
  pub inserted: usize,
  /// Already present, left untouched.
  pub skipped: usize,
  /// Rejected or errored; each one is logged.
  pub failed: usize,
}

/// Inserts every flag that isn't already present.
///
/// Existing flags are never overwritten. A bad record is logged and skipped
/// without stopping the rest of the batch.
pub async fn bulk_load(db: &Db, records: &[NewFlag]) -> Result<LoadSummary> {
  let mut summary = LoadSummary::default();

  for record in records {
    if record.flag.trim().is_empty() {
      warn!("skipping flag with empty value (team {})", record.team);
      summary.failed += 1;
      continue;
    }

    let result = sqlx::query(
      "
      INSERT OR IGNORE INTO flags (flag, team, channel_id)
      VALUES (?, ?, ?)
      ",
    )
    .bind(&record.flag)
    .bind(record.team)
    .bind(record.channel_id)
    .execute(&db.0)
    .await;

    match result {
      Ok(done) if done.rows_affected() == 0 => summary.skipped += 1,
      Ok(_) => summary.inserted += 1,
      Err(err) => {
        error!("Error importing flag for team {}: {}", record.team, err);
        summary.failed += 1;
      }
    }
  }

  Ok(summary)
}

/// Exact-match lookup of a flag's owner.
pub async fn find_by_flag(db: &Db, flag: &str) -> Result<Option<Flag>> {
  sqlx::query_as::<_, Flag>(
    "
    SELECT flag, team, channel_id
    FROM flags
    WHERE flag = ?
    ",
  )
  .bind(flag)
  .fetch_optional(&db.0)
  .await
  .context("could not look up flag")
}
