use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;

use crate::controllers::poll_controllers::{load_poll, models::PollResultsResponse};
use crate::state::AppState;
use crate::utils::{error::AppResult, validation::parse_id};

pub async fn get_results(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<PollResultsResponse>> {
    let poll_obj_id = parse_id(&poll_id, "poll")?;
    let poll = load_poll(&state, poll_obj_id).await?;

    Ok(Json(PollResultsResponse {
        poll_id: poll.id.to_hex(),
        effective_status: poll.effective_status(Utc::now()),
        total_votes: poll.total_votes(),
        results: poll.results(),
        title: poll.title,
    }))
}
