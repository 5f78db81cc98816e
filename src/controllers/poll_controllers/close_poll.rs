use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::controllers::poll_controllers::{load_poll, models::PollResponse};
use crate::models::poll_models::PollStatus;
use crate::state::AppState;
use crate::utils::{
    error::{AppError, AppResult},
    validation::parse_id,
};

/// Closing an already closed poll is a no-op.
pub async fn close_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResponse>> {
    let poll_obj_id = parse_id(&poll_id, "poll")?;
    let mut poll = load_poll(&state, poll_obj_id).await?;

    if poll.status != PollStatus::Closed {
        poll = state
            .store
            .set_poll_status(poll_obj_id, PollStatus::Closed)
            .await?
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;
        info!(poll_id = %poll.id, "poll closed");
    }

    Ok(Json(PollResponse::new(poll, Utc::now())))
}
