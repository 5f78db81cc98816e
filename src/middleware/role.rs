use axum::{extract::Request, middleware::Next, response::Response};

use crate::utils::{
    access::{Principal, Requirement},
    error::AppError,
};

/// Must run inside [`jwt_auth`](super::jwt::jwt_auth).
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let principal = req
        .extensions()
        .get::<Principal>()
        .ok_or_else(|| AppError::AuthenticationError("Sign in required".to_string()))?;

    principal.require(Requirement::Admin)?;

    Ok(next.run(req).await)
}
