use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single user's vote. At most one per (poll, user).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct VoteRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub poll_id: ObjectId,

    pub user_id: ObjectId,

    pub option_index: i32,

    pub created_at: DateTime<Utc>,
}
