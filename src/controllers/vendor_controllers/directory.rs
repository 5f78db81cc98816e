use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    controllers::{
        review_controllers::models::ReviewResponse,
        vendor_controllers::models::{DirectoryQuery, VendorResponse},
    },
    models::{
        review_models::ReviewStatus,
        vendor_models::{sort_vendors, Vendor, VendorSort, VendorStatus},
    },
    state::AppState,
    utils::{
        access::Principal,
        auth::optional_principal,
        error::{AppError, AppResult},
        validation::parse_id,
    },
};

fn parse_sort(raw: Option<&str>) -> AppResult<VendorSort> {
    match raw.map(str::trim) {
        None | Some("") | Some("rating") => Ok(VendorSort::Rating),
        Some("reviews") => Ok(VendorSort::Reviews),
        Some("name") => Ok(VendorSort::Name),
        Some(other) => Err(AppError::BadRequest(format!("Unknown sort '{other}'"))),
    }
}

/// Approved vendors matching the query, in the requested order.
pub fn filter_directory(vendors: Vec<Vendor>, query: &DirectoryQuery) -> AppResult<Vec<Vendor>> {
    let sort = parse_sort(query.sort.as_deref())?;
    let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());

    let mut listed: Vec<Vendor> = vendors
        .into_iter()
        .filter(|v| v.status == VendorStatus::Approved)
        .filter(|v| v.in_category(query.category.as_deref()))
        .filter(|v| search.map_or(true, |term| v.matches_directory_search(term)))
        .collect();

    sort_vendors(&mut listed, sort);
    Ok(listed)
}

pub async fn list_directory(
    State(state): State<AppState>,
    Query(query): Query<DirectoryQuery>,
) -> AppResult<Json<Vec<VendorResponse>>> {
    let vendors = state.store.list_vendors().await?;
    let listed = filter_directory(vendors, &query)?;

    Ok(Json(listed.into_iter().map(VendorResponse::from).collect()))
}

fn can_view(vendor: &Vendor, principal: Option<&Principal>) -> bool {
    vendor.status == VendorStatus::Approved
        || principal.is_some_and(|p| p.is_admin() || vendor.is_owned_by(p.user_id))
}

pub async fn get_vendor(
    Path(vendor_id): Path<String>,
    State(state): State<AppState>,
    cookie_jar: CookieJar,
    headers: HeaderMap,
) -> AppResult<Json<VendorResponse>> {
    let vendor_obj_id = parse_id(&vendor_id, "vendor")?;

    let vendor = state
        .store
        .find_vendor(vendor_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))?;

    if vendor.status != VendorStatus::Approved {
        let principal = optional_principal(&state, &cookie_jar, &headers).await?;
        if !can_view(&vendor, principal.as_ref()) {
            return Err(AppError::NotFound("Vendor not found".to_string()));
        }
    }

    Ok(Json(vendor.into()))
}

pub async fn vendor_reviews(
    Path(vendor_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let vendor_obj_id = parse_id(&vendor_id, "vendor")?;

    let vendor = state
        .store
        .find_vendor(vendor_obj_id)
        .await?
        .filter(|v| v.status == VendorStatus::Approved)
        .ok_or_else(|| AppError::NotFound("Vendor not found".to_string()))?;

    let mut reviews: Vec<_> = state
        .store
        .list_reviews_for_vendor(vendor.id)
        .await?
        .into_iter()
        .filter(|r| r.status == ReviewStatus::Approved)
        .collect();
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let profiles = state.store.list_profiles().await?;

    let responses = reviews
        .into_iter()
        .map(|review| {
            let reviewer = profiles
                .iter()
                .find(|p| p.id == review.user_id)
                .and_then(|p| p.public_name())
                .map(str::to_string);
            ReviewResponse::new(review, Some(vendor.business_name.clone()), reviewer)
        })
        .collect();

    Ok(Json(responses))
}

#[cfg(test)]
mod tests {
    use mongodb::bson::oid::ObjectId;

    use super::*;
    use crate::models::{role_models::Role, vendor_models::tests::vendor};
    use crate::utils::access::RoleSet;

    #[test]
    fn test_directory_hides_unapproved() {
        let mut pending = vendor("Pending Place", "Food", Some(5.0), 1);
        pending.status = VendorStatus::Pending;
        let mut suspended = vendor("Suspended Spot", "Food", Some(5.0), 1);
        suspended.status = VendorStatus::Suspended;
        let approved = vendor("Open Kitchen", "Food", Some(3.0), 1);

        let listed = filter_directory(vec![pending, suspended, approved], &DirectoryQuery::default()).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].business_name, "Open Kitchen");
    }

    #[test]
    fn test_directory_search_category_and_sort() {
        let vendors = vec![
            vendor("Mama's Kitchen", "Food", Some(4.8), 10),
            vendor("Kitchen Gadgets Fix", "Tech Repair", Some(4.9), 2),
            vendor("Quick Wash", "Laundry", Some(4.0), 40),
        ];

        let query = DirectoryQuery {
            search: Some("kitchen".to_string()),
            category: None,
            sort: Some("rating".to_string()),
        };
        let listed = filter_directory(vendors.clone(), &query).unwrap();
        let names: Vec<_> = listed.iter().map(|v| v.business_name.as_str()).collect();
        assert_eq!(names, ["Kitchen Gadgets Fix", "Mama's Kitchen"]);

        let query = DirectoryQuery {
            search: None,
            category: Some("Food".to_string()),
            sort: None,
        };
        assert_eq!(filter_directory(vendors.clone(), &query).unwrap().len(), 1);

        let query = DirectoryQuery {
            search: None,
            category: Some("all".to_string()),
            sort: Some("reviews".to_string()),
        };
        assert_eq!(filter_directory(vendors, &query).unwrap()[0].business_name, "Quick Wash");
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        let query = DirectoryQuery {
            sort: Some("distance".to_string()),
            ..DirectoryQuery::default()
        };
        assert!(matches!(filter_directory(vec![], &query), Err(AppError::BadRequest(_))));
    }

    fn principal(roles: Vec<Role>) -> Principal {
        Principal {
            user_id: ObjectId::new(),
            email: "p@example.com".to_string(),
            roles: RoleSet::new(roles),
        }
    }

    #[tokio::test]
    async fn test_public_reviews_never_show_reviewer_email() {
        use std::sync::Arc;

        use chrono::Utc;

        use crate::config::Config;
        use crate::db::{memory_store::MemoryStore, store::Store};
        use crate::models::{review_models::tests::review, user_models::Profile};

        let store = Arc::new(MemoryStore::new());
        let listing = vendor("Mama's Kitchen", "Food", None, 0);
        store.insert_vendor(&listing).await.unwrap();

        let now = Utc::now();
        let nameless = Profile {
            id: ObjectId::new(),
            email: "quiet@example.com".to_string(),
            full_name: Some("   ".to_string()),
            whatsapp: None,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };
        store.insert_profile(&nameless).await.unwrap();

        let mut row = review(4, ReviewStatus::Approved);
        row.vendor_id = listing.id;
        row.user_id = nameless.id;
        store.insert_review(&row).await.unwrap();

        let state = AppState::new(store, Config::default());
        let Json(reviews) = vendor_reviews(Path(listing.id.to_hex()), State(state)).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].reviewer_name, None);
    }

    #[test]
    fn test_unapproved_vendor_visibility() {
        let owner = principal(vec![Role::User, Role::Vendor]);
        let stranger = principal(vec![Role::User]);
        let admin = principal(vec![Role::Admin]);

        let mut listing = vendor("Pending Place", "Food", None, 0);
        listing.status = VendorStatus::Pending;
        listing.user_id = Some(owner.user_id);

        assert!(!can_view(&listing, None));
        assert!(!can_view(&listing, Some(&stranger)));
        assert!(can_view(&listing, Some(&owner)));
        assert!(can_view(&listing, Some(&admin)));
    }
}
