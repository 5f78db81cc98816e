use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;
use crate::utils::{
    access::{Principal, RoleSet},
    error::{AppError, AppResult},
    session::{self, SESSION_COOKIE},
    validation::parse_id,
};

/// Session token from the cookie, falling back to `Authorization: Bearer`.
pub fn extract_token(cookie_jar: &CookieJar, headers: &HeaderMap) -> Option<String> {
    if let Some(cookie) = cookie_jar.get(SESSION_COOKIE) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

/// Verifies `token` and loads the account's profile and current roles.
pub async fn resolve_principal(state: &AppState, token: &str) -> AppResult<Principal> {
    let claims = session::verify_token(token, &state.config.session.secret)?;
    let user_id = parse_id(&claims.sub, "user")
        .map_err(|_| AppError::AuthenticationError("Invalid session".to_string()))?;

    let profile = state
        .store
        .find_profile(user_id)
        .await?
        .ok_or_else(|| AppError::AuthenticationError("Account no longer exists".to_string()))?;

    let roles = state.store.roles_for_user(user_id).await?;

    Ok(Principal {
        user_id,
        email: profile.email,
        roles: RoleSet::new(roles),
    })
}

/// Like [`resolve_principal`] for endpoints that also serve anonymous callers.
/// A missing or invalid token yields `None`.
pub async fn optional_principal(
    state: &AppState,
    cookie_jar: &CookieJar,
    headers: &HeaderMap,
) -> AppResult<Option<Principal>> {
    let Some(token) = extract_token(cookie_jar, headers) else {
        return Ok(None);
    };

    match resolve_principal(state, &token).await {
        Ok(principal) => Ok(Some(principal)),
        Err(AppError::AuthenticationError(_)) => Ok(None),
        Err(other) => Err(other),
    }
}
