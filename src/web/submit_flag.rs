use axum::{extract::State, http::StatusCode, Json};

use crate::controllers::flag::{self, SubmitError};

use super::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct Form {
  /// Name of the channel the flag was submitted from.
  pub channel: String,
  pub flag: String,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Reply {
  pub ok: bool,
  pub message: String,
}

// The channel name is the only proof of identity. Submitting as another team
// only credits that team, so there is nothing to gain from spoofing it.
pub async fn submit_flag(
  State(state): State<AppState>,
  Json(form): Json<Form>,
) -> (StatusCode, Json<Reply>) {
  let result = flag::submit(
    &state.db,
    &state.config,
    state.notifier.as_ref(),
    &form.channel,
    &form.flag,
  )
  .await;

  match result {
    Ok(submission) => {
      let reply = Reply {
        ok: true,
        message: submission.message(),
      };
      (StatusCode::OK, Json(reply))
    }
    Err(err) => {
      let status = match err {
        SubmitError::InvalidChannel | SubmitError::MissingTeam => {
          StatusCode::BAD_REQUEST
        }
        SubmitError::InvalidFlag => StatusCode::NOT_FOUND,
        SubmitError::OwnFlag => StatusCode::FORBIDDEN,
        SubmitError::AlreadyCaptured => StatusCode::CONFLICT,
        SubmitError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
      };
      let reply = Reply {
        ok: false,
        message: err.to_string(),
      };
      (status, Json(reply))
    }
  }
}
