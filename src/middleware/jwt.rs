use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::debug;

use crate::state::AppState;
use crate::utils::{
    auth::{extract_token, resolve_principal},
    error::AppError,
};

/// Rejects requests without a valid session and stores the resolved
/// [`Principal`](crate::utils::access::Principal) in the request extensions.
pub async fn jwt_auth(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    headers: HeaderMap,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&cookie_jar, &headers)
        .ok_or_else(|| AppError::AuthenticationError("No token found".to_string()))?;

    let principal = resolve_principal(&state, &token).await?;
    debug!(user_id = %principal.user_id, "authenticated request");

    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}
