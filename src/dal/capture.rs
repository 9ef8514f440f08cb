use anyhow::Result;

use crate::models::TeamId;

use super::Db;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
  Recorded,
  /// This team already has this flag on record. Nothing was written.
  AlreadyCaptured,
}

/// Credits `team` with capturing `flag`.
///
/// The `UNIQUE (flag, team)` constraint decides between concurrent
/// submissions of the same pair, so exactly one of them is recorded. The
/// caller must have rejected self-captures already; a flag that doesn't exist
/// is an error.
pub async fn record(
  db: &Db,
  flag: &str,
  team: TeamId,
) -> Result<CaptureOutcome> {
  let result = sqlx::query(
    "
    INSERT INTO captures (flag, team)
    VALUES (?, ?)
    ",
  )
  .bind(flag)
  .bind(team)
  .execute(&db.0)
  .await;

  match result {
    Ok(_) => Ok(CaptureOutcome::Recorded),
    Err(sqlx::Error::Database(err)) if err.is_unique_violation() => {
      Ok(CaptureOutcome::AlreadyCaptured)
    }
    Err(sqlx::Error::Database(err)) if err.is_foreign_key_violation() => {
      bail!("cannot record capture of unknown flag {:?}", flag)
    }
    Err(err) => {
      Err(anyhow::Error::new(err).context("could not record capture"))
    }
  }
}
