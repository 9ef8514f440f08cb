mod scoreboard;
mod submit_flag;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
  routing::{get, post},
  Router,
};

use crate::config::Config;
use crate::dal::Db;
use crate::notify::Notifier;

/// Everything a request handler needs, shared by all requests.
#[derive(Clone)]
pub struct AppState {
  pub db: Db,
  pub config: Arc<Config>,
  pub notifier: Arc<dyn Notifier>,
}

pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/submit", post(submit_flag::submit_flag))
    .route("/scoreboard", get(scoreboard::scoreboard))
    .with_state(state)
}

pub async fn run(state: AppState, bind_addr: SocketAddr) -> Result<()> {
  let listener = tokio::net::TcpListener::bind(bind_addr)
    .await
    .with_context(|| format!("couldn't bind to {}", bind_addr))?;
  info!("listening on {}", bind_addr);
  axum::serve(listener, router(state))
    .await
    .context("server error")
}
