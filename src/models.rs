use std::fmt;

/// Numeric team identifier, as parsed out of a team's channel name.
#[derive(
  Copy,
  Clone,
  Debug,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct TeamId(pub i64);

impl fmt::Display for TeamId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Opaque reference to a team's notification channel.
#[derive(
  Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct ChannelId(pub i64);

impl fmt::Display for ChannelId {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    self.0.fmt(f)
  }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Flag {
  pub flag: String,
  pub team: TeamId,
  pub channel_id: ChannelId,
}

/// A flag definition as read from the import source.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct NewFlag {
  pub flag: String,
  pub team: TeamId,
  pub channel_id: ChannelId,
}

/// One row of a per-team count query.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct AggregateRow {
  pub team: TeamId,
  pub count: i64,
}

#[cfg(test)]
impl AggregateRow {
  pub fn new(team: i64, count: i64) -> Self {
    AggregateRow {
      team: TeamId(team),
      count,
    }
  }
}
