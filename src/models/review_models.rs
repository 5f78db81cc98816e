use std::str::FromStr;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Ratings below this ask the vendor to follow up.
pub const LOW_RATING_THRESHOLD: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
    #[default]
    Pending,
    Approved,
    Flagged,
}

impl FromStr for ReviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ReviewStatus::Pending),
            "approved" => Ok(ReviewStatus::Approved),
            "flagged" => Ok(ReviewStatus::Flagged),
            other => Err(format!("unknown review status '{other}'")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub vendor_id: ObjectId,
    pub rating: i32,
    pub comment: Option<String>,
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Review {
    pub fn is_low_rating(&self) -> bool {
        self.rating < LOW_RATING_THRESHOLD
    }
}

pub fn is_valid_rating(rating: i32) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// Mean rating and count over the approved reviews in `reviews`.
pub fn rating_summary<'a>(reviews: impl IntoIterator<Item = &'a Review>) -> (Option<f64>, i64) {
    let (sum, count) = reviews
        .into_iter()
        .filter(|review| review.status == ReviewStatus::Approved)
        .fold((0_i64, 0_i64), |(sum, count), review| {
            (sum + i64::from(review.rating), count + 1)
        });

    if count == 0 {
        (None, 0)
    } else {
        #[allow(clippy::cast_precision_loss)]
        let mean = sum as f64 / count as f64;
        (Some(mean), count)
    }
}

/// Rating filter used on the vendor dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RatingFilter {
    #[default]
    All,
    /// Two stars or fewer.
    Low,
    /// Four stars or more.
    High,
    Exact(i32),
}

impl RatingFilter {
    pub fn matches(self, rating: i32) -> bool {
        match self {
            RatingFilter::All => true,
            RatingFilter::Low => rating <= 2,
            RatingFilter::High => rating >= 4,
            RatingFilter::Exact(expected) => rating == expected,
        }
    }
}

impl FromStr for RatingFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(RatingFilter::All),
            "low" => Ok(RatingFilter::Low),
            "high" => Ok(RatingFilter::High),
            other => match other.parse::<i32>() {
                Ok(rating) if is_valid_rating(rating) => Ok(RatingFilter::Exact(rating)),
                _ => Err(format!("unknown rating filter '{other}'")),
            },
        }
    }
}
