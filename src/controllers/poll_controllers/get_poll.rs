use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::controllers::poll_controllers::{load_poll, models::PollResponse};
use crate::state::AppState;
use crate::utils::{error::AppResult, validation::parse_id};

pub async fn get_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResponse>> {
    let poll_obj_id = parse_id(&poll_id, "poll")?;
    let poll = load_poll(&state, poll_obj_id).await?;

    Ok(Json(PollResponse::new(poll, Utc::now())))
}
