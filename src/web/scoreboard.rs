use axum::{
  extract::State,
  http::{header, HeaderMap, StatusCode},
  response::{IntoResponse, Response},
};

use crate::controllers::scoreboard::{self, ScoreboardError};
use crate::scoring::render_table;

use super::AppState;

const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

fn plain(status: StatusCode, body: String) -> Response {
  (status, [(header::CONTENT_TYPE, "text/plain")], body).into_response()
}

pub async fn scoreboard(
  State(state): State<AppState>,
  headers: HeaderMap,
) -> Response {
  let token = headers
    .get(ADMIN_TOKEN_HEADER)
    .and_then(|value| value.to_str().ok());
  if token != Some(state.config.admin_token.as_str()) {
    return plain(StatusCode::FORBIDDEN, "Forbidden.".to_owned());
  }

  match scoreboard::scoreboard(&state.db, &state.config.scoring).await {
    Ok(lines) => plain(StatusCode::OK, render_table(&lines)),
    Err(err @ ScoreboardError::Empty) => {
      plain(StatusCode::NOT_FOUND, err.to_string())
    }
    Err(err @ ScoreboardError::Storage(_)) => {
      plain(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
    }
  }
}
