use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    controllers::vendor_controllers::models::{AdminVendorQuery, SetVendorStatusRequest, VendorResponse},
    models::vendor_models::{Vendor, VendorStatus},
    state::AppState,
    utils::{
        error::{AppError, AppResult},
        validation::parse_id,
    },
};

/// `None` keeps every status.
fn parse_status_filter(raw: Option<&str>) -> AppResult<Option<VendorStatus>> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(other) => other.parse::<VendorStatus>().map(Some).map_err(AppError::BadRequest),
    }
}

pub fn filter_admin_vendors(mut vendors: Vec<Vendor>, query: &AdminVendorQuery) -> AppResult<Vec<Vendor>> {
    let status = parse_status_filter(query.status.as_deref())?;
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    vendors.retain(|v| status.map_or(true, |s| v.status == s));
    if let Some(term) = search {
        vendors.retain(|v| v.matches_admin_search(term));
    }
    vendors.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    Ok(vendors)
}

pub async fn list_all_vendors(
    State(state): State<AppState>,
    Query(query): Query<AdminVendorQuery>,
) -> AppResult<Json<Vec<VendorResponse>>> {
    let vendors = filter_admin_vendors(state.store.list_vendors().await?, &query)?;
    Ok(Json(vendors.into_iter().map(VendorResponse::from).collect()))
}

pub async fn set_vendor_status(
    Path(vendor_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<SetVendorStatusRequest>,
) -> AppResult<Json<VendorResponse>> {
    let vendor_obj_id = parse_id(&vendor_id, "vendor")?;

    let vendor = state
        .store
        .set_vendor_status(vendor_obj_id, payload.status, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))?;

    info!(vendor_id = %vendor.id, status = ?vendor.status, "vendor status changed");

    Ok(Json(vendor.into()))
}

pub async fn delete_vendor(
    Path(vendor_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let vendor_obj_id = parse_id(&vendor_id, "vendor")?;

    if state.store.find_vendor(vendor_obj_id).await?.is_none() {
        return Err(AppError::NotFound("Vendor not found".to_string()));
    }

    let removed_reviews = state.store.delete_reviews_for_vendor(vendor_obj_id).await?;
    state.store.delete_vendor(vendor_obj_id).await?;

    info!(vendor_id = %vendor_obj_id, removed_reviews, "vendor deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Vendor deleted",
        "removed_reviews": removed_reviews
    })))
}
