use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored status. Expiry is derived from `ends_at`, see [`Poll::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    #[default]
    Active,
    Closed,
}

/// Status as seen by voters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveStatus {
    Active,
    Closed,
    Ended,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Poll {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    pub description: Option<String>,
    pub options: Vec<String>,
    /// One counter per entry of `options`, same order.
    pub votes: Vec<i64>,
    pub status: PollStatus,
    pub ends_at: Option<DateTime<Utc>>,
    pub created_by: Option<ObjectId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptionResult {
    pub index: usize,
    pub text: String,
    pub votes: i64,
    pub percentage: f64,
}

impl Poll {
    pub fn effective_status(&self, now: DateTime<Utc>) -> EffectiveStatus {
        match self.status {
            PollStatus::Closed => EffectiveStatus::Closed,
            PollStatus::Active => match self.ends_at {
                Some(ends_at) if ends_at <= now => EffectiveStatus::Ended,
                _ => EffectiveStatus::Active,
            },
        }
    }

    pub fn accepts_votes(&self, now: DateTime<Utc>) -> bool {
        self.effective_status(now) == EffectiveStatus::Active
    }

    pub fn has_option(&self, index: i32) -> bool {
        usize::try_from(index).is_ok_and(|index| index < self.options.len())
    }

    pub fn total_votes(&self) -> i64 {
        self.votes.iter().sum()
    }

    /// Votes for `index`, treating a short tally as zero.
    pub fn votes_for(&self, index: usize) -> i64 {
        self.votes.get(index).copied().unwrap_or(0)
    }

    pub fn results(&self) -> Vec<OptionResult> {
        let total = self.total_votes();
        self.options
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let votes = self.votes_for(index);
                #[allow(clippy::cast_precision_loss)]
                let percentage = if total == 0 {
                    0.0
                } else {
                    votes as f64 * 100.0 / total as f64
                };
                OptionResult {
                    index,
                    text: text.clone(),
                    votes,
                    percentage,
                }
            })
            .collect()
    }
}

/// Trims options and drops the blank ones.
pub fn normalize_options(options: &[String]) -> Vec<String> {
    options
        .iter()
        .map(|option| option.trim().to_string())
        .filter(|option| !option.is_empty())
        .collect()
}
