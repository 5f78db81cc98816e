use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    Json,
};
use mongodb::bson::oid::ObjectId;

use crate::controllers::admin_controllers::models::{UserSearchQuery, UserSummary};
use crate::models::{
    review_models::{Review, ReviewStatus},
    role_models::UserRole,
    user_models::Profile,
    vote_record_models::VoteRecord,
};
use crate::state::AppState;
use crate::utils::{access::RoleSet, error::AppResult};

fn count_by<T>(rows: impl Iterator<Item = T>, key: impl Fn(&T) -> ObjectId) -> HashMap<ObjectId, usize> {
    let mut counts = HashMap::new();
    for row in rows {
        *counts.entry(key(&row)).or_insert(0) += 1;
    }
    counts
}

/// Newest accounts first, joined with their roles and activity.
pub fn summarize_users(
    mut profiles: Vec<Profile>,
    roles: &[UserRole],
    reviews: &[Review],
    votes: &[VoteRecord],
    search: Option<&str>,
) -> Vec<UserSummary> {
    if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
        profiles.retain(|p| p.matches_search(term));
    }
    profiles.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let review_counts = count_by(
        reviews.iter().filter(|r| r.status == ReviewStatus::Approved),
        |r| r.user_id,
    );
    let vote_counts = count_by(votes.iter(), |v| v.user_id);

    profiles
        .into_iter()
        .map(|profile| {
            let held = roles
                .iter()
                .filter(|r| r.user_id == profile.id)
                .map(|r| r.role)
                .collect();

            UserSummary {
                id: profile.id.to_hex(),
                roles: RoleSet::new(held).names(),
                review_count: review_counts.get(&profile.id).copied().unwrap_or(0),
                vote_count: vote_counts.get(&profile.id).copied().unwrap_or(0),
                email: profile.email,
                full_name: profile.full_name,
                whatsapp: profile.whatsapp,
                created_at: profile.created_at,
            }
        })
        .collect()
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserSearchQuery>,
) -> AppResult<Json<Vec<UserSummary>>> {
    let profiles = state.store.list_profiles().await?;
    let roles = state.store.list_user_roles().await?;
    let reviews = state.store.list_reviews().await?;
    let votes = state.store.list_votes().await?;

    Ok(Json(summarize_users(
        profiles,
        &roles,
        &reviews,
        &votes,
        query.search.as_deref(),
    )))
}
