use axum::{Extension, Json};

use crate::controllers::auth_controllers::models::MeResponse;
use crate::utils::access::Principal;

pub async fn me(Extension(principal): Extension<Principal>) -> Json<MeResponse> {
    Json(MeResponse {
        user_id: principal.user_id.to_hex(),
        email: principal.email.clone(),
        roles: principal.roles.names(),
        is_admin: principal.roles.is_admin(),
        is_vendor: principal.roles.is_vendor(),
        is_super_admin: principal.roles.is_super_admin(),
    })
}
