use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::controllers::review_controllers::models::ReviewResponse;
use crate::models::vendor_models::{Vendor, VendorStatus};

#[derive(Deserialize, Debug, Clone, Default)]
pub struct CreateListingRequest {
    pub business_name: String,
    pub category: Option<String>,
    /// Takes precedence over `category` when given.
    pub category_id: Option<String>,
    pub location: String,
    pub phone: String,
    /// Defaults to the account email.
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub preferred_contact: Option<String>,
}

/// Owner-editable fields. Absent fields are left unchanged.
#[derive(Deserialize, Debug, Default)]
pub struct UpdateListingRequest {
    pub business_name: Option<String>,
    pub category: Option<String>,
    pub category_id: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub gallery: Option<Vec<String>>,
    pub preferred_contact: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DirectoryQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct AdminVendorQuery {
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SetVendorStatusRequest {
    pub status: VendorStatus,
}

#[derive(Deserialize, Debug, Default)]
pub struct MyReviewsQuery {
    pub rating: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct VendorResponse {
    pub id: String,
    pub user_id: Option<String>,
    pub business_name: String,
    pub category: String,
    pub category_id: Option<String>,
    pub description: Option<String>,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub location: String,
    pub image_url: Option<String>,
    pub gallery: Vec<String>,
    pub preferred_contact: Option<String>,
    pub rating: Option<f64>,
    pub review_count: i64,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vendor> for VendorResponse {
    fn from(vendor: Vendor) -> Self {
        Self {
            id: vendor.id.to_hex(),
            user_id: vendor.user_id.map(|id| id.to_hex()),
            business_name: vendor.business_name,
            category: vendor.category,
            category_id: vendor.category_id.map(|id| id.to_hex()),
            description: vendor.description,
            email: vendor.email,
            phone: vendor.phone,
            whatsapp: vendor.whatsapp,
            location: vendor.location,
            image_url: vendor.image_url,
            gallery: vendor.gallery,
            preferred_contact: vendor.preferred_contact,
            rating: vendor.rating,
            review_count: vendor.review_count,
            status: vendor.status,
            created_at: vendor.created_at,
            updated_at: vendor.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct DashboardReviewsResponse {
    pub vendor_id: String,
    pub rating: Option<f64>,
    pub review_count: i64,
    /// Reviews rated below 3 that may need a follow-up.
    pub low_rated_count: usize,
    pub reviews: Vec<ReviewResponse>,
}
