use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::poll_models::{EffectiveStatus, OptionResult, Poll, PollStatus};

#[derive(Deserialize, Debug)]
pub struct CreatePollRequest {
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    /// Falls back to `polls.default_duration_days`.
    pub duration_days: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct CastVoteRequest {
    pub option_index: i32,
}

#[derive(Deserialize, Debug, Default)]
pub struct PollListQuery {
    pub status: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PollResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    pub votes: Vec<i64>,
    pub total_votes: i64,
    pub status: PollStatus,
    pub effective_status: EffectiveStatus,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PollResponse {
    pub fn new(poll: Poll, now: DateTime<Utc>) -> Self {
        let effective_status = poll.effective_status(now);
        let total_votes = poll.total_votes();
        // Pad short tallies so every option has a counter.
        let votes = (0..poll.options.len()).map(|i| poll.votes_for(i)).collect();

        Self {
            id: poll.id.to_hex(),
            title: poll.title,
            description: poll.description,
            options: poll.options,
            votes,
            total_votes,
            status: poll.status,
            effective_status,
            ends_at: poll.ends_at,
            created_by: poll.created_by.map(|id| id.to_hex()),
            created_at: poll.created_at,
        }
    }
}

#[derive(Deserialize, Serialize, Debug)]
pub struct PollResultsResponse {
    pub poll_id: String,
    pub title: String,
    pub effective_status: EffectiveStatus,
    pub total_votes: i64,
    pub results: Vec<OptionResult>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct MyVoteResponse {
    pub has_voted: bool,
    pub option_index: Option<i32>,
}
