use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Login credentials. Shares its id with the account's [`Profile`].
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Profile {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub email: String,
    pub full_name: Option<String>,
    pub whatsapp: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn display_name(&self) -> &str {
        self.public_name().unwrap_or(&self.email)
    }

    /// Name shown to other users. Never falls back to the email.
    pub fn public_name(&self) -> Option<&str> {
        self.full_name.as_deref().filter(|name| !name.trim().is_empty())
    }

    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.email.to_lowercase().contains(&term)
            || self
                .full_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&term))
    }
}
