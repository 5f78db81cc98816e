use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    controllers::auth_controllers::models::{AccessQuery, AccessResponse},
    state::AppState,
    utils::{
        access::{evaluate, requirement_for_path},
        auth::optional_principal,
        error::AppResult,
    },
};

/// Tells the frontend whether the caller may open `path`, and where to go if not.
pub async fn check_access(
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    headers: HeaderMap,
    Query(query): Query<AccessQuery>,
) -> AppResult<Json<AccessResponse>> {
    let principal = optional_principal(&state, &cookie_jar, &headers).await?;

    let requirement = requirement_for_path(&query.path);
    let decision = evaluate(principal.as_ref(), requirement);

    Ok(Json(AccessResponse {
        path: query.path,
        signed_in: principal.is_some(),
        requirement,
        decision,
        redirect_to: decision.redirect_to(),
    }))
}
