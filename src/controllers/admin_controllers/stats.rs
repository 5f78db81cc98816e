use axum::{extract::State, Json};

use crate::controllers::admin_controllers::models::StatsResponse;
use crate::models::{review_models::ReviewStatus, vendor_models::VendorStatus};
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<StatsResponse>> {
    let profiles = state.store.list_profiles().await?;
    let vendors = state.store.list_vendors().await?;
    let reviews = state.store.list_reviews().await?;
    let polls = state.store.list_polls().await?;

    Ok(Json(StatsResponse {
        total_users: profiles.len(),
        total_vendors: vendors.len(),
        total_reviews: reviews.len(),
        total_polls: polls.len(),
        pending_vendors: vendors.iter().filter(|v| v.status == VendorStatus::Pending).count(),
        pending_reviews: reviews.iter().filter(|r| r.status == ReviewStatus::Pending).count(),
    }))
}
