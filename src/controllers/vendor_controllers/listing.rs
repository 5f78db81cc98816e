use axum::{
    extract::{Extension, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::info;

use crate::{
    controllers::{
        review_controllers::models::ReviewResponse,
        vendor_controllers::models::{
            CreateListingRequest, DashboardReviewsResponse, MyReviewsQuery, UpdateListingRequest,
            VendorResponse,
        },
    },
    models::{
        review_models::RatingFilter,
        role_models::Role,
        vendor_models::{Vendor, VendorStatus},
    },
    state::AppState,
    utils::{
        access::Principal,
        error::{AppError, AppResult},
        validation::{normalize_email, optional_text, parse_id, require_text},
    },
};

/// Category name for a listing. A `category_id` must name a stored category
/// and wins over free text.
async fn resolve_category(
    state: &AppState,
    category_id: Option<&str>,
    category: Option<&str>,
) -> AppResult<(String, Option<ObjectId>)> {
    if let Some(raw) = category_id.map(str::trim).filter(|s| !s.is_empty()) {
        let id = parse_id(raw, "category")?;
        let stored = state
            .store
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::ValidationError("Unknown category".to_string()))?;
        return Ok((stored.name, Some(id)));
    }

    let name = require_text(category.unwrap_or_default(), "Category")?;
    Ok((name, None))
}

/// Validates a new listing for `owner` without storing it.
pub async fn build_listing(
    state: &AppState,
    owner: ObjectId,
    owner_email: &str,
    req: CreateListingRequest,
    fallback_whatsapp: Option<String>,
) -> AppResult<Vendor> {
    let business_name = require_text(&req.business_name, "Business name")?;
    let location = require_text(&req.location, "Location")?;
    let phone = require_text(&req.phone, "Phone")?;
    let (category, category_id) =
        resolve_category(state, req.category_id.as_deref(), req.category.as_deref()).await?;

    let email = match optional_text(req.email) {
        Some(email) => normalize_email(&email)?,
        None => owner_email.to_string(),
    };

    let now = Utc::now();
    Ok(Vendor {
        id: ObjectId::new(),
        user_id: Some(owner),
        business_name,
        category,
        category_id,
        description: optional_text(req.description),
        email,
        phone,
        whatsapp: optional_text(req.whatsapp).or(fallback_whatsapp),
        location,
        image_url: optional_text(req.image_url),
        gallery: Vec::new(),
        preferred_contact: optional_text(req.preferred_contact),
        rating: None,
        review_count: 0,
        status: VendorStatus::Pending,
        created_at: now,
        updated_at: now,
    })
}

async fn owned_listing(state: &AppState, principal: &Principal) -> AppResult<Vendor> {
    state
        .store
        .find_vendor_by_owner(principal.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("You do not have a vendor listing".to_string()))
}

pub async fn create_listing(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<CreateListingRequest>,
) -> AppResult<(StatusCode, Json<VendorResponse>)> {
    if state.store.find_vendor_by_owner(principal.user_id).await?.is_some() {
        return Err(AppError::Conflict("You already have a vendor listing".to_string()));
    }

    let vendor = build_listing(&state, principal.user_id, &principal.email, payload, None).await?;
    state.store.insert_vendor(&vendor).await?;
    state.store.ensure_role(principal.user_id, Role::Vendor).await?;

    info!(vendor_id = %vendor.id, user_id = %principal.user_id, "vendor listing created, pending approval");

    Ok((StatusCode::CREATED, Json(vendor.into())))
}

pub async fn my_listing(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<VendorResponse>> {
    let vendor = owned_listing(&state, &principal).await?;
    Ok(Json(vendor.into()))
}

pub async fn update_listing(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateListingRequest>,
) -> AppResult<Json<VendorResponse>> {
    let mut vendor = owned_listing(&state, &principal).await?;

    if let Some(name) = payload.business_name {
        vendor.business_name = require_text(&name, "Business name")?;
    }
    if payload.category_id.is_some() || payload.category.is_some() {
        let (category, category_id) =
            resolve_category(&state, payload.category_id.as_deref(), payload.category.as_deref())
                .await?;
        vendor.category = category;
        vendor.category_id = category_id;
    }
    if let Some(location) = payload.location {
        vendor.location = require_text(&location, "Location")?;
    }
    if let Some(phone) = payload.phone {
        vendor.phone = require_text(&phone, "Phone")?;
    }
    if let Some(email) = payload.email {
        vendor.email = normalize_email(&email)?;
    }
    if payload.whatsapp.is_some() {
        vendor.whatsapp = optional_text(payload.whatsapp);
    }
    if payload.description.is_some() {
        vendor.description = optional_text(payload.description);
    }
    if payload.image_url.is_some() {
        vendor.image_url = optional_text(payload.image_url);
    }
    if let Some(gallery) = payload.gallery {
        vendor.gallery = gallery
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
    }
    if payload.preferred_contact.is_some() {
        vendor.preferred_contact = optional_text(payload.preferred_contact);
    }

    vendor.updated_at = Utc::now();
    let vendor = state
        .store
        .update_vendor_details(&vendor)
        .await?
        .ok_or_else(|| AppError::NotFound("You do not have a vendor listing".to_string()))?;

    Ok(Json(vendor.into()))
}

/// Reviews of the caller's listing for the vendor dashboard, newest first.
pub async fn my_listing_reviews(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<MyReviewsQuery>,
) -> AppResult<Json<DashboardReviewsResponse>> {
    let filter = query
        .rating
        .as_deref()
        .unwrap_or_default()
        .trim()
        .parse::<RatingFilter>()
        .map_err(AppError::BadRequest)?;
    let vendor = owned_listing(&state, &principal).await?;

    let mut reviews = state.store.list_reviews_for_vendor(vendor.id).await?;
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let low_rated_count = reviews.iter().filter(|r| r.is_low_rating()).count();
    let profiles = state.store.list_profiles().await?;

    let reviews = reviews
        .into_iter()
        .filter(|r| filter.matches(r.rating))
        .map(|review| {
            let reviewer = profiles
                .iter()
                .find(|p| p.id == review.user_id)
                .and_then(|p| p.public_name())
                .map(str::to_string);
            ReviewResponse::new(review, Some(vendor.business_name.clone()), reviewer)
        })
        .collect();

    Ok(Json(DashboardReviewsResponse {
        vendor_id: vendor.id.to_hex(),
        rating: vendor.rating,
        review_count: vendor.review_count,
        low_rated_count,
        reviews,
    }))
}
