use axum::{
    extract::{Extension, State},
    Json,
};
use chrono::Utc;

use crate::{
    controllers::profile_controllers::models::{ProfileResponse, UpdateProfileRequest},
    models::user_models::Profile,
    state::AppState,
    utils::{
        access::Principal,
        error::{AppError, AppResult},
        validation::{optional_text, require_text},
    },
};

async fn own_profile(state: &AppState, principal: &Principal) -> AppResult<Profile> {
    state
        .store
        .find_profile(principal.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}

pub async fn get_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<ProfileResponse>> {
    Ok(Json(own_profile(&state, &principal).await?.into()))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ProfileResponse>> {
    let mut profile = own_profile(&state, &principal).await?;

    if let Some(full_name) = payload.full_name {
        profile.full_name = Some(require_text(&full_name, "Full name")?);
    }
    if payload.whatsapp.is_some() {
        profile.whatsapp = optional_text(payload.whatsapp);
    }
    if payload.avatar_url.is_some() {
        profile.avatar_url = optional_text(payload.avatar_url);
    }

    profile.updated_at = Utc::now();
    state.store.replace_profile(&profile).await?;

    Ok(Json(profile.into()))
}
