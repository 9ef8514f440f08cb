use std::error::Error as StdError;

use crate::config::ScoringConfig;
use crate::dal::{self, Db};
use crate::scoring::{build_scoreboard, ScoreLine};

#[derive(Debug, Display)]
pub enum ScoreboardError {
  #[display(fmt = "No teams found.")]
  Empty,

  #[display(fmt = "An unknown error occurred.")]
  Storage(anyhow::Error),
}

impl StdError for ScoreboardError {}

pub async fn scoreboard(
  db: &Db,
  scoring: &ScoringConfig,
) -> Result<Vec<ScoreLine>, ScoreboardError> {
  let gained = dal::aggregate::gained(db).await.map_err(storage_error)?;
  if gained.is_empty() {
    return Err(ScoreboardError::Empty);
  }
  let lost = dal::aggregate::lost(db).await.map_err(storage_error)?;

  Ok(build_scoreboard(&gained, &lost, scoring))
}

fn storage_error(err: anyhow::Error) -> ScoreboardError {
  error!("scoreboard query failed: {:?}", err);
  ScoreboardError::Storage(err)
}
