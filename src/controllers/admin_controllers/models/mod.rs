use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::role_models::Role;

#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq)]
pub struct StatsResponse {
    pub total_users: usize,
    pub total_vendors: usize,
    pub total_reviews: usize,
    pub total_polls: usize,
    pub pending_vendors: usize,
    pub pending_reviews: usize,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TopVendor {
    pub id: String,
    pub business_name: String,
    pub category: String,
    pub rating: f64,
    pub review_count: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CategoryStat {
    pub category: String,
    pub vendor_count: usize,
    /// Mean over the category's reviews, 0 when it has none.
    pub avg_rating: f64,
}

#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct AnalyticsResponse {
    pub total_users: usize,
    pub approved_vendors: usize,
    pub approved_reviews: usize,
    pub total_polls: usize,
    pub average_rating: f64,
    pub top_vendors: Vec<TopVendor>,
    pub category_stats: Vec<CategoryStat>,
}

#[derive(Deserialize, Debug, Default)]
pub struct UserSearchQuery {
    pub search: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct UserSummary {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub whatsapp: Option<String>,
    pub roles: Vec<Role>,
    pub review_count: usize,
    pub vote_count: usize,
    pub created_at: DateTime<Utc>,
}
