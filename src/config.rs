use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Point values used by the scoreboard.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ScoringConfig {
  /// Points awarded for every flag a team captures.
  pub points_gained: i64,

  /// Points (zero or negative) charged for every flag a team loses.
  pub points_lost_base: i64,

  /// Fraction of `points_lost_base` charged again for every lost flag after
  /// the first one.
  pub points_lost_scale_fraction: f64,
}

impl ScoringConfig {
  /// The extra penalty added per additional lost flag,
  /// `floor(points_lost_base * points_lost_scale_fraction)`.
  pub fn scaled_penalty_unit(&self) -> i64 {
    crate::scoring::scaled_penalty_unit(
      self.points_lost_base,
      self.points_lost_scale_fraction,
    )
  }

  fn validate(&self) -> Result<()> {
    ensure!(
      self.points_gained >= 0,
      "scoring.points_gained must not be negative (got {})",
      self.points_gained
    );
    ensure!(
      self.points_lost_base <= 0,
      "scoring.points_lost_base must be zero or negative (got {})",
      self.points_lost_base
    );
    ensure!(
      self.points_lost_scale_fraction.is_finite()
        && self.points_lost_scale_fraction >= 0.0,
      "scoring.points_lost_scale_fraction must be a non-negative number (got {})",
      self.points_lost_scale_fraction
    );
    Ok(())
  }
}

impl Default for ScoringConfig {
  fn default() -> Self {
    ScoringConfig {
      points_gained: 50,
      points_lost_base: 0,
      points_lost_scale_fraction: 0.0,
    }
  }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Config {
  pub database_url: String,
  pub flags_csv: Option<PathBuf>,
  pub bind_addr: SocketAddr,
  pub admin_token: String,

  /// Exact length every submitted flag must have, if set.
  pub flag_length: Option<usize>,

  #[serde(default)]
  pub scoring: ScoringConfig,
}

impl Config {
  /// Reads and validates a TOML config file.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
      .with_context(|| format!("couldn't read config {}", path.display()))?;
    let config = Config::from_toml(&contents)
      .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(config)
  }

  pub fn from_toml(contents: &str) -> Result<Self> {
    let config: Config =
      toml::from_str(contents).context("couldn't parse config")?;
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<()> {
    ensure!(!self.admin_token.is_empty(), "admin_token must not be empty");
    if let Some(len) = self.flag_length {
      ensure!(len > 0, "flag_length must be positive");
    }
    self.scoring.validate()
  }
}
