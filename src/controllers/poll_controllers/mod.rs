pub mod cast_vote;
pub mod check_vote;
pub mod close_poll;
pub mod create_poll;
pub mod delete_poll;
pub mod get_poll;
pub mod get_results;
pub mod models;
pub mod polls;

use mongodb::bson::oid::ObjectId;

use crate::models::poll_models::Poll;
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

pub(crate) async fn load_poll(state: &AppState, poll_id: ObjectId) -> AppResult<Poll> {
    state
        .store
        .find_poll(poll_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))
}
