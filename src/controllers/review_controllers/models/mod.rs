use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::review_models::{Review, ReviewStatus};

#[derive(Deserialize, Debug)]
pub struct SubmitReviewRequest {
    pub vendor_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Review addressed by (part of) the business name.
#[derive(Deserialize, Debug)]
pub struct QuickReviewRequest {
    pub vendor_name: String,
    pub rating: i32,
    pub comment: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdminReviewQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SetReviewStatusRequest {
    pub status: ReviewStatus,
}

#[derive(Deserialize, Debug)]
pub struct EditCommentRequest {
    pub comment: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ReviewResponse {
    pub id: String,
    pub vendor_id: String,
    pub user_id: String,
    pub vendor_name: Option<String>,
    pub reviewer_name: Option<String>,
    pub rating: i32,
    pub comment: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewResponse {
    pub fn new(review: Review, vendor_name: Option<String>, reviewer_name: Option<String>) -> Self {
        Self {
            id: review.id.to_hex(),
            vendor_id: review.vendor_id.to_hex(),
            user_id: review.user_id.to_hex(),
            vendor_name,
            reviewer_name,
            rating: review.rating,
            comment: review.comment,
            status: review.status,
            created_at: review.created_at,
            updated_at: review.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct SubmitReviewResponse {
    pub success: bool,
    pub review: ReviewResponse,
    /// Set for ratings below 3 so the vendor can follow up.
    pub notify_vendor: bool,
}
