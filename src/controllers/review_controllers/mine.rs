use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    controllers::review_controllers::{
        models::{ReviewResponse, UpdateReviewRequest},
        refresh_vendor_rating,
        submit::check_rating,
    },
    models::review_models::Review,
    state::AppState,
    utils::{
        access::Principal,
        error::{AppError, AppResult},
        validation::{optional_text, parse_id},
    },
};

async fn find_review(state: &AppState, review_id: &str) -> AppResult<Review> {
    let review_obj_id = parse_id(review_id, "review")?;
    state
        .store
        .find_review(review_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))
}

pub async fn my_reviews(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let mut reviews = state.store.list_reviews_by_user(principal.user_id).await?;
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let vendors = state.store.list_vendors().await?;

    let responses = reviews
        .into_iter()
        .map(|review| {
            let vendor_name = vendors
                .iter()
                .find(|v| v.id == review.vendor_id)
                .map(|v| v.business_name.clone());
            ReviewResponse::new(review, vendor_name, None)
        })
        .collect();

    Ok(Json(responses))
}

pub async fn update_review(
    Path(review_id): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<ReviewResponse>> {
    let mut review = find_review(&state, &review_id).await?;

    if review.user_id != principal.user_id {
        return Err(AppError::Forbidden("You can only edit your own reviews".to_string()));
    }

    if let Some(rating) = payload.rating {
        check_rating(rating)?;
        review.rating = rating;
    }
    if payload.comment.is_some() {
        review.comment = optional_text(payload.comment);
    }

    review.updated_at = Utc::now();
    state.store.replace_review(&review).await?;
    refresh_vendor_rating(state.store.as_ref(), review.vendor_id).await?;

    Ok(Json(ReviewResponse::new(review, None, None)))
}

/// Authors delete their own reviews; admins may delete any.
pub async fn delete_review(
    Path(review_id): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<Value>> {
    let review = find_review(&state, &review_id).await?;

    if review.user_id != principal.user_id && !principal.is_admin() {
        return Err(AppError::Forbidden("You can only delete your own reviews".to_string()));
    }

    remove_review(&state, &review).await?;
    info!(review_id = %review.id, by = %principal.user_id, "review deleted");

    Ok(Json(json!({ "success": true, "message": "Review deleted" })))
}

pub(crate) async fn remove_review(state: &AppState, review: &Review) -> AppResult<()> {
    state.store.delete_review(review.id).await?;
    refresh_vendor_rating(state.store.as_ref(), review.vendor_id).await
}
