use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};
use mongodb::bson::oid::ObjectId;
use tracing::info;

use crate::controllers::poll_controllers::models::{CreatePollRequest, PollResponse};
use crate::models::poll_models::{normalize_options, Poll, PollStatus};
use crate::state::AppState;
use crate::utils::{
    access::Principal,
    error::{AppError, AppResult},
    validation::{optional_text, require_text},
};

pub const MAX_DURATION_DAYS: i64 = 365;

/// Trimmed options, at least two, no duplicates.
pub fn validate_options(options: &[String]) -> AppResult<Vec<String>> {
    let options = normalize_options(options);

    if options.len() < 2 {
        return Err(AppError::ValidationError(
            "Poll must have at least 2 options".to_string(),
        ));
    }

    let mut seen: Vec<String> = Vec::with_capacity(options.len());
    for option in &options {
        let key = option.to_lowercase();
        if seen.contains(&key) {
            return Err(AppError::ValidationError("Poll options must be unique".to_string()));
        }
        seen.push(key);
    }

    Ok(options)
}

pub async fn create_poll(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreatePollRequest>,
) -> AppResult<(StatusCode, Json<PollResponse>)> {
    let title = require_text(&payload.title, "Title")?;
    let options = validate_options(&payload.options)?;

    let duration_days = payload
        .duration_days
        .unwrap_or(state.config.polls.default_duration_days);
    if !(1..=MAX_DURATION_DAYS).contains(&duration_days) {
        return Err(AppError::ValidationError(format!(
            "Poll duration must be between 1 and {MAX_DURATION_DAYS} days"
        )));
    }

    let now = Utc::now();
    let poll = Poll {
        id: ObjectId::new(),
        title,
        description: optional_text(payload.description),
        votes: vec![0; options.len()],
        options,
        status: PollStatus::Active,
        ends_at: Some(now + Duration::days(duration_days)),
        created_by: Some(principal.user_id),
        created_at: now,
    };

    state.store.insert_poll(&poll).await?;

    info!(poll_id = %poll.id, created_by = %principal.user_id, duration_days, "poll created");

    Ok((StatusCode::CREATED, Json(PollResponse::new(poll, now))))
}
