use std::{cmp::Ordering, str::FromStr};

use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorStatus {
    #[default]
    Pending,
    Approved,
    Suspended,
}

impl FromStr for VendorStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(VendorStatus::Pending),
            "approved" => Ok(VendorStatus::Approved),
            "suspended" => Ok(VendorStatus::Suspended),
            other => Err(format!("unknown vendor status '{other}'")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Vendor {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    /// Owning account. Admin-seeded listings may have none.
    pub user_id: Option<ObjectId>,
    pub business_name: String,
    pub category: String,
    pub category_id: Option<ObjectId>,
    pub description: Option<String>,
    pub email: String,
    pub phone: String,
    pub whatsapp: Option<String>,
    pub location: String,
    pub image_url: Option<String>,
    #[serde(default)]
    pub gallery: Vec<String>,
    pub preferred_contact: Option<String>,
    /// Mean of approved review ratings; `None` until the first one.
    pub rating: Option<f64>,
    pub review_count: i64,
    pub status: VendorStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vendor {
    pub fn is_owned_by(&self, user_id: ObjectId) -> bool {
        self.user_id == Some(user_id)
    }

    /// Directory search: business name or category.
    pub fn matches_directory_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.business_name.to_lowercase().contains(&term)
            || self.category.to_lowercase().contains(&term)
    }

    /// Admin search, which also covers contact fields.
    pub fn matches_admin_search(&self, term: &str) -> bool {
        let lowered = term.to_lowercase();
        self.matches_directory_search(term)
            || self.email.to_lowercase().contains(&lowered)
            || self.location.to_lowercase().contains(&lowered)
    }

    /// Copies the fields a listing owner may edit.
    pub fn copy_details_from(&mut self, other: &Vendor) {
        self.business_name = other.business_name.clone();
        self.category = other.category.clone();
        self.category_id = other.category_id;
        self.description = other.description.clone();
        self.email = other.email.clone();
        self.phone = other.phone.clone();
        self.whatsapp = other.whatsapp.clone();
        self.location = other.location.clone();
        self.image_url = other.image_url.clone();
        self.gallery = other.gallery.clone();
        self.preferred_contact = other.preferred_contact.clone();
        self.updated_at = other.updated_at;
    }

    pub fn in_category(&self, category: Option<&str>) -> bool {
        match category {
            None | Some("all") | Some("") => true,
            Some(category) => self.category.eq_ignore_ascii_case(category),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorSort {
    #[default]
    Rating,
    Reviews,
    Name,
}

/// Orders a directory page. Unrated vendors sink below rated ones.
pub fn sort_vendors(vendors: &mut [Vendor], sort: VendorSort) {
    match sort {
        VendorSort::Rating => vendors.sort_by(|a, b| compare_ratings(b.rating, a.rating)),
        VendorSort::Reviews => vendors.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
        VendorSort::Name => vendors.sort_by(|a, b| {
            a.business_name
                .to_lowercase()
                .cmp(&b.business_name.to_lowercase())
        }),
    }
}

pub fn compare_ratings(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}
