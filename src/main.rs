use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use flagledger::controllers::scoreboard;
use flagledger::notify::LogNotifier;
use flagledger::web::{self, AppState};
use flagledger::{import, scoring};
use flagledger::{Config, Db};
use structopt::StructOpt;

#[derive(StructOpt)]
struct Opt {
  #[structopt(subcommand)]
  cmd: Command,

  #[structopt(long = "config")]
  config: PathBuf,
}

#[derive(StructOpt)]
enum Command {
  /// Import the configured flags and serve submissions
  #[structopt(name = "run")]
  Run,

  /// Create the database tables
  #[structopt(name = "migrate")]
  Migrate,

  /// Load flag definitions from a CSV file
  #[structopt(name = "import")]
  Import {
    /// Defaults to `flags_csv` from the config
    #[structopt(long = "file")]
    file: Option<PathBuf>,
  },

  /// Print the current scoreboard
  #[structopt(name = "scoreboard")]
  Scoreboard,
}

#[tokio::main]
async fn main() -> Result<()> {
  env_logger::builder().format_timestamp(None).init();
  let opt = Opt::from_args();

  let config = Config::load(&opt.config)?;

  // connect to the db
  let db = Db::connect(&config.database_url).await?;
  db.initialize().await?;

  match opt.cmd {
    Command::Run => {
      if let Some(path) = &config.flags_csv {
        import::import_flags(&db, path).await?;
      }

      let bind_addr = config.bind_addr;
      let state = AppState {
        db,
        config: Arc::new(config),
        notifier: Arc::new(LogNotifier),
      };
      web::run(state, bind_addr).await?;
    }
    Command::Migrate => {
      log::info!("database at {} is initialized", config.database_url);
    }
    Command::Import { file } => {
      let path = file
        .or_else(|| config.flags_csv.clone())
        .context("no flags file given and no flags_csv in the config")?;
      import::import_flags(&db, path).await?;
    }
    Command::Scoreboard => {
      let lines = scoreboard::scoreboard(&db, &config.scoring).await?;
      print!("{}", scoring::render_table(&lines));
    }
  }

  Ok(())
}
