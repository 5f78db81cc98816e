use axum::{
    extract::{Extension, Path, State},
    Json,
};

use crate::controllers::poll_controllers::{load_poll, models::MyVoteResponse};
use crate::state::AppState;
use crate::utils::{access::Principal, error::AppResult, validation::parse_id};

pub async fn check_user_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<MyVoteResponse>> {
    let poll_obj_id = parse_id(&poll_id, "poll")?;
    let poll = load_poll(&state, poll_obj_id).await?;

    let vote = state.store.find_vote(poll.id, principal.user_id).await?;

    Ok(Json(MyVoteResponse {
        has_voted: vote.is_some(),
        option_index: vote.map(|record| record.option_index),
    }))
}
