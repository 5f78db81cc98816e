pub mod check_access;
pub mod login;
pub mod logout;
pub mod me;
pub mod models;
pub mod signup;

use axum::{
    http::{header::SET_COOKIE, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::utils::error::{AppError, AppResult};

/// JSON response carrying a `Set-Cookie` header.
pub(crate) fn with_cookie<T: Serialize>(body: T, cookie: &str) -> AppResult<Response> {
    let mut resp = Json(body).into_response();
    resp.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_str(cookie)
            .map_err(|e| AppError::InternalError(format!("Failed to create cookie header: {e}")))?,
    );
    Ok(resp)
}
