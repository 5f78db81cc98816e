use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::utils::error::{AppError, AppResult};

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Account id, hex encoded.
    pub sub: String,
    pub exp: usize,
}

pub fn create_token(user_id: &str, config: &SessionConfig) -> AppResult<String> {
    let expiration = (Utc::now() + Duration::hours(config.ttl_hours)).timestamp();
    let exp = usize::try_from(expiration)
        .map_err(|_| AppError::InternalError("Session expiry out of range".to_string()))?;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?)
}

pub fn verify_token(token: &str, secret: &str) -> AppResult<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

/// `Set-Cookie` value that stores `token` for the session lifetime.
pub fn session_cookie(token: &str, config: &SessionConfig) -> String {
    format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; {}; Max-Age={}",
        same_site(config),
        config.ttl_hours * 3600
    )
}

/// `Set-Cookie` value that expires the session cookie.
pub fn clear_session_cookie(config: &SessionConfig) -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; {}; Max-Age=0", same_site(config))
}

fn same_site(config: &SessionConfig) -> &'static str {
    if config.secure_cookie {
        "Secure; SameSite=None"
    } else {
        "SameSite=Lax"
    }
}
