use mongodb::bson::oid::ObjectId;

use crate::utils::error::{AppError, AppResult};

pub const MIN_PASSWORD_LEN: usize = 6;

pub fn parse_id(raw: &str, what: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid {what} id")))
}

/// Trimmed, lowercased address with a non-empty local part and a dotted domain.
pub fn normalize_email(raw: &str) -> AppResult<String> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
                && !domain.contains('@')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(email)
    } else {
        Err(AppError::ValidationError("A valid email address is required".to_string()))
    }
}

pub fn require_text(value: &str, field: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::ValidationError(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

/// `None` for absent or blank input, trimmed text otherwise.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
