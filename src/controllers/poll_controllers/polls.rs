use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};

use crate::controllers::poll_controllers::models::{PollListQuery, PollResponse};
use crate::models::poll_models::{EffectiveStatus, Poll};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

fn parse_status(raw: Option<&str>) -> AppResult<Option<EffectiveStatus>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some("active") => Ok(Some(EffectiveStatus::Active)),
        Some("closed") => Ok(Some(EffectiveStatus::Closed)),
        Some("ended") => Ok(Some(EffectiveStatus::Ended)),
        Some(other) => Err(AppError::BadRequest(format!("Unknown poll status '{other}'"))),
    }
}

/// Polls with the requested effective status, newest first.
pub fn filter_polls(
    mut polls: Vec<Poll>,
    status: Option<EffectiveStatus>,
    now: DateTime<Utc>,
) -> Vec<Poll> {
    polls.retain(|poll| status.map_or(true, |s| poll.effective_status(now) == s));
    polls.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    polls
}

pub async fn get_all_polls(
    State(state): State<AppState>,
    Query(query): Query<PollListQuery>,
) -> AppResult<Json<Vec<PollResponse>>> {
    let status = parse_status(query.status.as_deref())?;
    let now = Utc::now();

    let polls = filter_polls(state.store.list_polls().await?, status, now);

    Ok(Json(polls.into_iter().map(|poll| PollResponse::new(poll, now)).collect()))
}
