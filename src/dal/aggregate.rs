use anyhow::{Context, Result};

use crate::models::AggregateRow;

use super::Db;

/// Number of distinct flags each flag-owning team has captured from other
/// teams.
///
/// Every team owning at least one flag is listed, including teams with no
/// captures, ordered by team. Captures of a team's own flags don't count.
pub async fn gained(db: &Db) -> Result<Vec<AggregateRow>> {
  sqlx::query_as::<_, AggregateRow>(
    "
    SELECT owners.team AS team, COUNT(DISTINCT taken.flag) AS count
    FROM (SELECT DISTINCT team FROM flags) AS owners
    LEFT JOIN (
      SELECT captures.flag AS flag, captures.team AS team
      FROM captures
      JOIN flags ON captures.flag = flags.flag
      WHERE captures.team != flags.team
    ) AS taken ON owners.team = taken.team
    GROUP BY owners.team
    ORDER BY owners.team
    ",
  )
  .fetch_all(&db.0)
  .await
  .context("could not count captured flags")
}

/// Number of captures of each team's flags by other teams.
///
/// Only teams that lost at least one flag are listed.
pub async fn lost(db: &Db) -> Result<Vec<AggregateRow>> {
  sqlx::query_as::<_, AggregateRow>(
    "
    SELECT flags.team AS team, COUNT(*) AS count
    FROM captures
    JOIN flags ON captures.flag = flags.flag
    WHERE captures.team != flags.team
    GROUP BY flags.team
    ORDER BY flags.team
    ",
  )
  .fetch_all(&db.0)
  .await
  .context("could not count lost flags")
}
