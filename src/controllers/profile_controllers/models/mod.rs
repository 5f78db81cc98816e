use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user_models::Profile;

/// Absent fields are left unchanged; blank strings clear optional ones.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub whatsapp: Option<String>,
    pub avatar_url: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub whatsapp: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id.to_hex(),
            email: profile.email,
            full_name: profile.full_name,
            whatsapp: profile.whatsapp,
            avatar_url: profile.avatar_url,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}
