use std::error::Error as StdError;

use crate::config::Config;
use crate::dal::{self, capture::CaptureOutcome, Db};
use crate::models::{Flag, TeamId};
use crate::notify::{flag_lost_message, Notifier};

#[derive(Debug, Display)]
pub enum SubmitError {
  #[display(fmt = "Invalid channel.")]
  InvalidChannel,

  #[display(fmt = "Could not find team number.")]
  MissingTeam,

  #[display(fmt = "Invalid flag.")]
  InvalidFlag,

  #[display(fmt = "Cannot submit your own flag.")]
  OwnFlag,

  #[display(fmt = "This flag has already been submitted by this team.")]
  AlreadyCaptured,

  /// Storage failure. The detail is for the log only.
  #[display(fmt = "An unknown error occurred.")]
  Storage(anyhow::Error),
}

impl StdError for SubmitError {}

impl SubmitError {
  /// Whether this is an expected outcome of a bad submission, rather than
  /// something going wrong on our side.
  pub fn is_user_error(&self) -> bool {
    !matches!(self, SubmitError::Storage(_))
  }
}

/// A recorded capture.
#[derive(Clone, Debug)]
pub struct Submission {
  pub team: TeamId,
  pub flag: Flag,
  pub points: i64,
}

impl Submission {
  pub fn message(&self) -> String {
    format!("Flag successfully submitted. +{} points", self.points)
  }
}

/// Finds the team a channel belongs to: the name has to start with `team`,
/// and the first run of digits in it is the team number.
pub fn resolve_team(channel_name: &str) -> Result<TeamId, SubmitError> {
  let channel_name = channel_name.to_lowercase();
  if !channel_name.starts_with("team") {
    return Err(SubmitError::InvalidChannel);
  }

  let digits = channel_name
    .chars()
    .skip_while(|c| !c.is_ascii_digit())
    .take_while(|c| c.is_ascii_digit())
    .collect::<String>();
  match digits.parse::<i64>() {
    Ok(team) if team != 0 => Ok(TeamId(team)),
    _ => Err(SubmitError::MissingTeam),
  }
}

/// Submits `flag` on behalf of the team owning `channel_name`.
///
/// On success the flag's owners are told through `notifier`. Storage errors
/// are logged here.
pub async fn submit(
  db: &Db,
  config: &Config,
  notifier: &dyn Notifier,
  channel_name: &str,
  flag: &str,
) -> Result<Submission, SubmitError> {
  let team = resolve_team(channel_name)?;

  if let Some(len) = config.flag_length {
    if flag.chars().count() != len {
      return Err(SubmitError::InvalidFlag);
    }
  }

  let owner = dal::flag::find_by_flag(db, flag)
    .await
    .map_err(storage_error)?
    .ok_or(SubmitError::InvalidFlag)?;

  if owner.team == team {
    return Err(SubmitError::OwnFlag);
  }

  match dal::capture::record(db, &owner.flag, team)
    .await
    .map_err(storage_error)?
  {
    CaptureOutcome::AlreadyCaptured => {
      debug!("team {} resubmitted a flag of team {}", team, owner.team);
      return Err(SubmitError::AlreadyCaptured);
    }
    CaptureOutcome::Recorded => {}
  }

  info!("team {} captured a flag of team {}", team, owner.team);
  notifier.send(owner.channel_id, flag_lost_message(team));

  Ok(Submission {
    team,
    flag: owner,
    points: config.scoring.points_gained,
  })
}

fn storage_error(err: anyhow::Error) -> SubmitError {
  error!("flag submission failed: {:?}", err);
  SubmitError::Storage(err)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::ScoringConfig;
  use crate::dal::testing;
  use crate::models::ChannelId;
  use crate::notify::MemoryNotifier;

  fn config() -> Config {
    Config {
      database_url: String::new(),
      flags_csv: None,
      bind_addr: "127.0.0.1:0".parse().unwrap(),
      admin_token: "admin".to_owned(),
      flag_length: None,
      scoring: ScoringConfig::default(),
    }
  }

  #[test]
  fn resolves_team_from_channel() {
    assert_eq!(resolve_team("team-7").unwrap(), TeamId(7));
    assert_eq!(resolve_team("Team12-chat").unwrap(), TeamId(12));
    assert_eq!(resolve_team("team3-room4").unwrap(), TeamId(3));
  }

  #[test]
  fn rejects_unmapped_channels() {
    assert!(matches!(
      resolve_team("general"),
      Err(SubmitError::InvalidChannel)
    ));
    assert!(matches!(
      resolve_team("my-team-1"),
      Err(SubmitError::InvalidChannel)
    ));
    assert!(matches!(
      resolve_team("team-lobby"),
      Err(SubmitError::MissingTeam)
    ));
    assert!(matches!(resolve_team("team0"), Err(SubmitError::MissingTeam)));
  }

  #[tokio::test]
  async fn successful_capture_notifies_owner() {
    let (_dir, db) = testing::two_teams().await;
    let notifier = MemoryNotifier::default();

    let submission = submit(&db, &config(), &notifier, "team-2", "A")
      .await
      .unwrap();
    assert_eq!(submission.team, TeamId(2));
    assert_eq!(submission.flag.team, TeamId(1));
    assert_eq!(submission.points, 50);
    assert_eq!(
      notifier.sent(),
      vec![(ChannelId(1001), flag_lost_message(TeamId(2)))]
    );
  }

  #[tokio::test]
  async fn resubmission_is_reported() {
    let (_dir, db) = testing::two_teams().await;
    let notifier = MemoryNotifier::default();

    submit(&db, &config(), &notifier, "team-2", "A")
      .await
      .unwrap();
    let err = submit(&db, &config(), &notifier, "team-2", "A")
      .await
      .unwrap_err();
    assert!(matches!(err, SubmitError::AlreadyCaptured));
    assert_eq!(notifier.sent().len(), 1);
  }

  #[tokio::test]
  async fn own_flag_never_reaches_the_store() {
    let (_dir, db) = testing::two_teams().await;
    let notifier = MemoryNotifier::default();

    let err = submit(&db, &config(), &notifier, "team-1", "A")
      .await
      .unwrap_err();
    assert!(matches!(err, SubmitError::OwnFlag));
    assert!(dal::aggregate::lost(&db).await.unwrap().is_empty());
    assert!(notifier.sent().is_empty());
  }

  #[tokio::test]
  async fn unknown_flag_is_invalid() {
    let (_dir, db) = testing::two_teams().await;
    let notifier = MemoryNotifier::default();

    let err = submit(&db, &config(), &notifier, "team-2", "Z")
      .await
      .unwrap_err();
    assert!(matches!(err, SubmitError::InvalidFlag));
    assert_eq!(err.to_string(), "Invalid flag.");
    assert!(err.is_user_error());
  }

  #[tokio::test]
  async fn wrong_length_is_invalid() {
    let (_dir, db) = testing::two_teams().await;
    let notifier = MemoryNotifier::default();
    let mut config = config();
    config.flag_length = Some(32);

    let err = submit(&db, &config, &notifier, "team-2", "A")
      .await
      .unwrap_err();
    assert!(matches!(err, SubmitError::InvalidFlag));
  }

  #[tokio::test]
  async fn storage_errors_are_opaque() {
    let (_dir, db) = testing::two_teams().await;
    let notifier = MemoryNotifier::default();
    db.close().await;

    let err = submit(&db, &config(), &notifier, "team-2", "A")
      .await
      .unwrap_err();
    assert!(!err.is_user_error());
    assert_eq!(err.to_string(), "An unknown error occurred.");
  }
}
