//! Score arithmetic over the per-team capture counts.

use std::collections::HashMap;

use crate::config::ScoringConfig;
use crate::models::{AggregateRow, TeamId};

/// One line of the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreLine {
  /// 1-based position in the gained aggregate.
  pub rank: usize,
  pub team: TeamId,
  pub gained: i64,
  pub lost: i64,
}

/// Saturates instead of overflowing, as do the other score functions.
pub fn gained_points(flags_captured: i64, points_per_flag: i64) -> i64 {
  flags_captured.saturating_mul(points_per_flag)
}

/// Points lost for `flags_lost` captured flags.
///
/// The first lost flag costs only `base_penalty`; every further flag also
/// costs `scaled_unit`.
pub fn lost_points(
  flags_lost: i64,
  base_penalty: i64,
  scaled_unit: i64,
) -> i64 {
  let base = flags_lost.saturating_mul(base_penalty);
  let scaled_extra = if scaled_unit != 0 && flags_lost >= 1 {
    (flags_lost - 1).saturating_mul(scaled_unit)
  } else {
    0
  };
  base.saturating_add(scaled_extra)
}

pub fn scaled_penalty_unit(base_penalty: i64, scale_fraction: f64) -> i64 {
  (base_penalty as f64 * scale_fraction).floor() as i64
}

/// Turns the two aggregates into one score line per team of `gained`.
///
/// Teams missing from `lost` lost nothing.
pub fn build_scoreboard(
  gained: &[AggregateRow],
  lost: &[AggregateRow],
  config: &ScoringConfig,
) -> Vec<ScoreLine> {
  let unit = config.scaled_penalty_unit();
  let lost = lost
    .iter()
    .map(|row| (row.team, row.count))
    .collect::<HashMap<_, _>>();

  gained
    .iter()
    .enumerate()
    .map(|(idx, row)| {
      let flags_lost = lost.get(&row.team).copied().unwrap_or(0);
      ScoreLine {
        rank: idx + 1,
        team: row.team,
        gained: gained_points(row.count, config.points_gained),
        lost: lost_points(flags_lost, config.points_lost_base, unit),
      }
    })
    .collect()
}

/// Renders the scoreboard as comma-delimited lines with a header.
pub fn render_table(lines: &[ScoreLine]) -> String {
  let mut out = String::from("rank,team,gained,lost\n");
  for line in lines {
    out.push_str(&format!(
      "{},{},{},{}\n",
      line.rank, line.team, line.gained, line.lost
    ));
  }
  out
}
