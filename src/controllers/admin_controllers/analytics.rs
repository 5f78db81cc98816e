use std::collections::BTreeMap;

use axum::{extract::State, Json};

use crate::controllers::admin_controllers::models::{AnalyticsResponse, CategoryStat, TopVendor};
use crate::models::{
    review_models::{Review, ReviewStatus},
    vendor_models::{compare_ratings, Vendor, VendorStatus},
};
use crate::state::AppState;
use crate::utils::error::AppResult;

const TOP_VENDORS: usize = 5;

#[derive(Default)]
struct CategoryTotals {
    vendors: usize,
    weighted_rating: f64,
    reviews: i64,
}

#[allow(clippy::cast_precision_loss)]
pub fn compute_analytics(
    total_users: usize,
    total_polls: usize,
    vendors: &[Vendor],
    reviews: &[Review],
) -> AnalyticsResponse {
    let approved_vendors: Vec<&Vendor> = vendors
        .iter()
        .filter(|v| v.status == VendorStatus::Approved)
        .collect();
    let approved_ratings: Vec<i32> = reviews
        .iter()
        .filter(|r| r.status == ReviewStatus::Approved)
        .map(|r| r.rating)
        .collect();

    let average_rating = if approved_ratings.is_empty() {
        0.0
    } else {
        approved_ratings.iter().map(|&r| f64::from(r)).sum::<f64>() / approved_ratings.len() as f64
    };

    let mut ranked: Vec<&Vendor> = approved_vendors
        .iter()
        .copied()
        .filter(|v| v.rating.is_some() && v.review_count > 0)
        .collect();
    ranked.sort_by(|a, b| {
        compare_ratings(b.rating, a.rating).then_with(|| b.review_count.cmp(&a.review_count))
    });

    let top_vendors = ranked
        .into_iter()
        .take(TOP_VENDORS)
        .map(|v| TopVendor {
            id: v.id.to_hex(),
            business_name: v.business_name.clone(),
            category: v.category.clone(),
            rating: v.rating.unwrap_or_default(),
            review_count: v.review_count,
        })
        .collect();

    let mut totals: BTreeMap<&str, CategoryTotals> = BTreeMap::new();
    for vendor in &approved_vendors {
        let entry = totals.entry(vendor.category.as_str()).or_default();
        entry.vendors += 1;
        if let Some(rating) = vendor.rating {
            entry.weighted_rating += rating * vendor.review_count as f64;
            entry.reviews += vendor.review_count;
        }
    }

    let category_stats = totals
        .into_iter()
        .map(|(category, t)| CategoryStat {
            category: category.to_string(),
            vendor_count: t.vendors,
            avg_rating: if t.reviews > 0 {
                t.weighted_rating / t.reviews as f64
            } else {
                0.0
            },
        })
        .collect();

    AnalyticsResponse {
        total_users,
        approved_vendors: approved_vendors.len(),
        approved_reviews: approved_ratings.len(),
        total_polls,
        average_rating,
        top_vendors,
        category_stats,
    }
}

pub async fn get_analytics(State(state): State<AppState>) -> AppResult<Json<AnalyticsResponse>> {
    let users = state.store.list_profiles().await?.len();
    let polls = state.store.list_polls().await?.len();
    let vendors = state.store.list_vendors().await?;
    let reviews = state.store.list_reviews().await?;

    Ok(Json(compute_analytics(users, polls, &vendors, &reviews)))
}
