use axum::{
    extract::{Extension, Path, State},
    Json,
};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::models::role_models::{Role, UserRole};
use crate::state::AppState;
use crate::utils::{
    access::{Principal, Requirement, RoleSet},
    error::{AppError, AppResult},
    validation::parse_id,
};

pub async fn grant_admin(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<Value>> {
    principal.require(Requirement::SuperAdmin)?;
    let target = parse_id(&user_id, "user")?;

    if state.store.find_profile(target).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    if RoleSet::new(state.store.roles_for_user(target).await?).is_admin() {
        return Err(AppError::Conflict("User is already an admin".to_string()));
    }

    state.store.insert_role(&UserRole::new(target, Role::Admin)).await?;

    info!(user_id = %target, by = %principal.user_id, "admin role granted");

    Ok(Json(json!({ "success": true, "message": "Admin role granted" })))
}

/// Removes the `admin` row only. `super_admin` is never revoked here.
pub async fn revoke_admin(
    Path(user_id): Path<String>,
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> AppResult<Json<Value>> {
    principal.require(Requirement::SuperAdmin)?;
    let target = parse_id(&user_id, "user")?;

    if !state.store.delete_role(target, Role::Admin).await? {
        return Err(AppError::NotFound("User is not an admin".to_string()));
    }

    if target == principal.user_id {
        warn!(user_id = %target, "super admin revoked their own admin role");
    }
    info!(user_id = %target, by = %principal.user_id, "admin role revoked");

    Ok(Json(json!({ "success": true, "message": "Admin role revoked" })))
}
