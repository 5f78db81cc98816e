use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::controllers::poll_controllers::load_poll;
use crate::state::AppState;
use crate::utils::{error::AppResult, validation::parse_id};

pub async fn delete_poll(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let poll_obj_id = parse_id(&poll_id, "poll")?;
    let poll = load_poll(&state, poll_obj_id).await?;

    let removed_votes = state.store.delete_votes_for_poll(poll.id).await?;
    state.store.delete_poll(poll.id).await?;

    info!(poll_id = %poll.id, removed_votes, "poll deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Poll deleted",
        "removed_votes": removed_votes
    })))
}
