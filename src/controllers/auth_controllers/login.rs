use axum::{extract::State, response::IntoResponse, Json};
use tracing::{info, warn};

use crate::{
    controllers::auth_controllers::{
        models::{AuthResponse, LoginRequest},
        with_cookie,
    },
    state::AppState,
    utils::{
        access::RoleSet,
        error::{AppError, AppResult},
        password::verify_password,
        session,
    },
};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let email = body.email.trim().to_lowercase();

    let account = state
        .store
        .find_account_by_email(&email)
        .await?
        .ok_or_else(|| AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&body.password, &account.password_hash)? {
        warn!(user_id = %account.id, "failed sign-in attempt");
        return Err(AppError::AuthenticationError(INVALID_CREDENTIALS.to_string()));
    }

    let profile = state.store.find_profile(account.id).await?;
    let roles = RoleSet::new(state.store.roles_for_user(account.id).await?);
    let token = session::create_token(&account.id.to_hex(), &state.config.session)?;

    info!(user_id = %account.id, "signed in");

    let response = AuthResponse {
        success: true,
        user_id: account.id.to_hex(),
        email: account.email,
        full_name: profile.and_then(|p| p.full_name),
        roles: roles.names(),
        redirect_to: roles.landing_path().to_string(),
        token: token.clone(),
    };

    with_cookie(response, &session::session_cookie(&token, &state.config.session))
}
