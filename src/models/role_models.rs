use std::fmt;

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Vendor,
    Admin,
    SuperAdmin,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Vendor => "vendor",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the `user_roles` table.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UserRole {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: ObjectId,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl UserRole {
    pub fn new(user_id: ObjectId, role: Role) -> Self {
        Self {
            id: ObjectId::new(),
            user_id,
            role,
            created_at: Utc::now(),
        }
    }
}
