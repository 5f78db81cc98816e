use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    controllers::review_controllers::{
        mine::remove_review,
        models::{AdminReviewQuery, EditCommentRequest, ReviewResponse, SetReviewStatusRequest},
        refresh_vendor_rating,
    },
    models::{
        review_models::{Review, ReviewStatus},
        user_models::Profile,
        vendor_models::Vendor,
    },
    state::AppState,
    utils::{
        error::{AppError, AppResult},
        validation::{optional_text, parse_id},
    },
};

fn parse_status_filter(raw: Option<&str>) -> AppResult<Option<ReviewStatus>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(other) => other.parse::<ReviewStatus>().map(Some).map_err(AppError::BadRequest),
    }
}

/// Reviews joined with vendor and reviewer names, filtered and newest first.
pub fn moderation_queue(
    mut reviews: Vec<Review>,
    vendors: &[Vendor],
    profiles: &[Profile],
    query: &AdminReviewQuery,
) -> AppResult<Vec<ReviewResponse>> {
    let status = parse_status_filter(query.status.as_deref())?;
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    reviews.retain(|r| status.map_or(true, |s| r.status == s));
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let queue = reviews
        .into_iter()
        .map(|review| {
            let vendor_name = vendors
                .iter()
                .find(|v| v.id == review.vendor_id)
                .map(|v| v.business_name.clone());
            let reviewer_name = profiles
                .iter()
                .find(|p| p.id == review.user_id)
                .map(|p| p.display_name().to_string());
            ReviewResponse::new(review, vendor_name, reviewer_name)
        })
        .filter(|row| match &search {
            None => true,
            Some(term) => [&row.vendor_name, &row.reviewer_name, &row.comment]
                .into_iter()
                .flatten()
                .any(|text| text.to_lowercase().contains(term)),
        })
        .collect();

    Ok(queue)
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Query(query): Query<AdminReviewQuery>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let reviews = state.store.list_reviews().await?;
    let vendors = state.store.list_vendors().await?;
    let profiles = state.store.list_profiles().await?;

    Ok(Json(moderation_queue(reviews, &vendors, &profiles, &query)?))
}

async fn load(state: &AppState, review_id: &str) -> AppResult<Review> {
    let review_obj_id = parse_id(review_id, "review")?;
    state
        .store
        .find_review(review_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
}

pub async fn set_review_status(
    Path(review_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<SetReviewStatusRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let mut review = load(&state, &review_id).await?;

    review.status = payload.status;
    review.updated_at = Utc::now();
    state.store.replace_review(&review).await?;
    refresh_vendor_rating(state.store.as_ref(), review.vendor_id).await?;

    info!(review_id = %review.id, status = ?review.status, "review moderated");

    Ok(Json(ReviewResponse::new(review, None, None)))
}

pub async fn edit_review_comment(
    Path(review_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<EditCommentRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let mut review = load(&state, &review_id).await?;

    review.comment = optional_text(payload.comment);
    review.updated_at = Utc::now();
    state.store.replace_review(&review).await?;

    Ok(Json(ReviewResponse::new(review, None, None)))
}

pub async fn admin_delete_review(
    Path(review_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let review = load(&state, &review_id).await?;
    remove_review(&state, &review).await?;

    info!(review_id = %review.id, "review removed by admin");

    Ok(Json(json!({ "success": true, "message": "Review deleted" })))
}
