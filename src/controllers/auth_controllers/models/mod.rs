use serde::{Deserialize, Serialize};

use crate::controllers::vendor_controllers::models::CreateListingRequest;
use crate::models::role_models::Role;
use crate::utils::access::{AccessDecision, Requirement};

#[derive(Deserialize, Debug)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub whatsapp: Option<String>,
    /// Present for vendor signups; creates a pending listing.
    pub vendor: Option<CreateListingRequest>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub success: bool,
    pub user_id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub roles: Vec<Role>,
    /// Role-based dashboard to open after sign-in.
    pub redirect_to: String,
    pub token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MeResponse {
    pub user_id: String,
    pub email: String,
    pub roles: Vec<Role>,
    pub is_admin: bool,
    pub is_vendor: bool,
    pub is_super_admin: bool,
}

#[derive(Deserialize)]
pub struct AccessQuery {
    pub path: String,
}

#[derive(Serialize)]
pub struct AccessResponse {
    pub path: String,
    pub signed_in: bool,
    pub requirement: Requirement,
    pub decision: AccessDecision,
    pub redirect_to: Option<&'static str>,
}
