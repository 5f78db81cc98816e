use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::info;

use crate::{
    controllers::review_controllers::{
        models::{QuickReviewRequest, ReviewResponse, SubmitReviewRequest, SubmitReviewResponse},
        refresh_vendor_rating,
    },
    models::{
        review_models::{is_valid_rating, Review, ReviewStatus, MAX_RATING, MIN_RATING},
        vendor_models::{Vendor, VendorStatus},
    },
    state::AppState,
    utils::{
        access::Principal,
        error::{AppError, AppResult},
        validation::{optional_text, parse_id, require_text},
    },
};

pub(crate) fn check_rating(rating: i32) -> AppResult<()> {
    if is_valid_rating(rating) {
        Ok(())
    } else {
        Err(AppError::ValidationError(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )))
    }
}

async fn store_review(
    state: &AppState,
    principal: &Principal,
    vendor: Vendor,
    rating: i32,
    comment: Option<String>,
) -> AppResult<(StatusCode, Json<SubmitReviewResponse>)> {
    check_rating(rating)?;

    if vendor.status != VendorStatus::Approved {
        return Err(AppError::NotFound("Vendor not found".to_string()));
    }
    if vendor.is_owned_by(principal.user_id) {
        return Err(AppError::Forbidden("You cannot review your own listing".to_string()));
    }

    let status = if state.config.reviews.auto_approve {
        ReviewStatus::Approved
    } else {
        ReviewStatus::Pending
    };

    let now = Utc::now();
    let review = Review {
        id: ObjectId::new(),
        user_id: principal.user_id,
        vendor_id: vendor.id,
        rating,
        comment: optional_text(comment),
        status,
        created_at: now,
        updated_at: now,
    };

    state.store.insert_review(&review).await?;
    refresh_vendor_rating(state.store.as_ref(), vendor.id).await?;

    let notify_vendor = review.is_low_rating();
    info!(
        review_id = %review.id,
        vendor_id = %vendor.id,
        rating,
        notify_vendor,
        "review submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitReviewResponse {
            success: true,
            review: ReviewResponse::new(review, Some(vendor.business_name), None),
            notify_vendor,
        }),
    ))
}

pub async fn submit_review(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<SubmitReviewRequest>,
) -> AppResult<(StatusCode, Json<SubmitReviewResponse>)> {
    let vendor_obj_id = parse_id(&payload.vendor_id, "vendor")?;

    let vendor = state
        .store
        .find_vendor(vendor_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))?;

    store_review(&state, &principal, vendor, payload.rating, payload.comment).await
}

/// First approved vendor whose business name contains `term`, in directory order.
pub fn find_by_name(vendors: Vec<Vendor>, term: &str) -> Option<Vendor> {
    let term = term.to_lowercase();
    let mut approved: Vec<Vendor> = vendors
        .into_iter()
        .filter(|v| v.status == VendorStatus::Approved)
        .collect();
    approved.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    approved
        .into_iter()
        .find(|v| v.business_name.to_lowercase().contains(&term))
}

pub async fn quick_review(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<QuickReviewRequest>,
) -> AppResult<(StatusCode, Json<SubmitReviewResponse>)> {
    let term = require_text(&payload.vendor_name, "Vendor name")?;

    let vendor = find_by_name(state.store.list_vendors().await?, &term).ok_or_else(|| {
        AppError::NotFound(format!("No approved vendor matches '{term}'"))
    })?;

    store_review(&state, &principal, vendor, payload.rating, payload.comment).await
}
