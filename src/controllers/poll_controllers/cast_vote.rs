use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::info;

use crate::controllers::poll_controllers::{
    load_poll,
    models::{CastVoteRequest, PollResponse},
};
use crate::models::{
    poll_models::{EffectiveStatus, Poll},
    vote_record_models::VoteRecord,
};
use crate::state::AppState;
use crate::utils::{
    access::Principal,
    error::{AppError, AppResult},
    validation::parse_id,
};

/// Checks that `poll` takes a vote for `option_index` right now.
pub fn validate_vote(poll: &Poll, option_index: i32, now: chrono::DateTime<Utc>) -> AppResult<usize> {
    match poll.effective_status(now) {
        EffectiveStatus::Active => {}
        EffectiveStatus::Closed => {
            return Err(AppError::BadRequest("Poll is closed. Voting is not allowed".to_string()))
        }
        EffectiveStatus::Ended => {
            return Err(AppError::BadRequest("Poll has ended. Voting is not allowed".to_string()))
        }
    }

    if !poll.has_option(option_index) {
        return Err(AppError::BadRequest("Invalid option for this poll".to_string()));
    }

    usize::try_from(option_index)
        .map_err(|_| AppError::BadRequest("Invalid option for this poll".to_string()))
}

pub async fn cast_vote(
    Path(poll_id): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CastVoteRequest>,
) -> AppResult<Json<PollResponse>> {
    let poll_obj_id = parse_id(&poll_id, "poll")?;
    let poll = load_poll(&state, poll_obj_id).await?;

    let now = Utc::now();
    let index = validate_vote(&poll, payload.option_index, now)?;

    // The unique (poll, user) record is written first so a second vote never
    // reaches the tally.
    state
        .store
        .insert_vote(&VoteRecord {
            id: ObjectId::new(),
            poll_id: poll.id,
            user_id: principal.user_id,
            option_index: payload.option_index,
            created_at: now,
        })
        .await?;

    state.store.increment_poll_vote(poll.id, index).await?;

    info!(poll_id = %poll.id, user_id = %principal.user_id, option_index = index, "vote recorded");

    let updated = load_poll(&state, poll.id).await?;
    Ok(Json(PollResponse::new(updated, now)))
}
