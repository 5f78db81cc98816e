use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use crate::db::store::Store;
use crate::models::{
    category_models::Category,
    poll_models::{Poll, PollStatus},
    review_models::Review,
    role_models::{Role, UserRole},
    user_models::{Account, Profile},
    vendor_models::{Vendor, VendorStatus},
    vote_record_models::VoteRecord,
};
use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Default)]
struct Tables {
    accounts: Vec<Account>,
    profiles: Vec<Profile>,
    user_roles: Vec<UserRole>,
    categories: Vec<Category>,
    vendors: Vec<Vendor>,
    reviews: Vec<Review>,
    polls: Vec<Poll>,
    poll_votes: Vec<VoteRecord>,
}

/// Process-local tables behind one lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Overwrites the row with the same id, or reports it missing.
fn replace_by_id<T: Clone>(rows: &mut [T], row: &T, id_of: impl Fn(&T) -> ObjectId, what: &str) -> AppResult<()> {
    let id = id_of(row);
    let slot = rows
        .iter_mut()
        .find(|existing| id_of(existing) == id)
        .ok_or_else(|| AppError::NotFound(format!("{what} not found")))?;
    *slot = row.clone();
    Ok(())
}

fn ensure_category_name_free(categories: &[Category], category: &Category) -> AppResult<()> {
    if categories
        .iter()
        .any(|c| c.id != category.id && c.has_name(&category.name))
    {
        return Err(AppError::Conflict(format!("Category '{}' already exists", category.name)));
    }
    Ok(())
}

fn remove_where<T>(rows: &mut Vec<T>, predicate: impl Fn(&T) -> bool) -> u64 {
    let before = rows.len();
    rows.retain(|row| !predicate(row));
    (before - rows.len()) as u64
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_account(&self, account: &Account) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables.accounts.iter().any(|a| a.email == account.email) {
            return Err(AppError::Conflict("An account with this email already exists".to_string()));
        }
        tables.accounts.push(account.clone());
        Ok(())
    }

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        let tables = self.tables.read().await;
        Ok(tables.accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn insert_profile(&self, profile: &Profile) -> AppResult<()> {
        self.tables.write().await.profiles.push(profile.clone());
        Ok(())
    }

    async fn find_profile(&self, id: ObjectId) -> AppResult<Option<Profile>> {
        let tables = self.tables.read().await;
        Ok(tables.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn list_profiles(&self) -> AppResult<Vec<Profile>> {
        Ok(self.tables.read().await.profiles.clone())
    }

    async fn replace_profile(&self, profile: &Profile) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        replace_by_id(&mut tables.profiles, profile, |p| p.id, "Profile")
    }

    async fn insert_role(&self, role: &UserRole) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .user_roles
            .iter()
            .any(|r| r.user_id == role.user_id && r.role == role.role)
        {
            return Err(AppError::Conflict(format!("User already has the {} role", role.role)));
        }
        tables.user_roles.push(role.clone());
        Ok(())
    }

    async fn roles_for_user(&self, user_id: ObjectId) -> AppResult<Vec<Role>> {
        let tables = self.tables.read().await;
        Ok(tables
            .user_roles
            .iter()
            .filter(|r| r.user_id == user_id)
            .map(|r| r.role)
            .collect())
    }

    async fn list_user_roles(&self) -> AppResult<Vec<UserRole>> {
        Ok(self.tables.read().await.user_roles.clone())
    }

    async fn delete_role(&self, user_id: ObjectId, role: Role) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        let removed = remove_where(&mut tables.user_roles, |r| r.user_id == user_id && r.role == role);
        Ok(removed > 0)
    }

    async fn insert_category(&self, category: &Category) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        ensure_category_name_free(&tables.categories, category)?;
        tables.categories.push(category.clone());
        Ok(())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.tables.read().await.categories.clone())
    }

    async fn find_category(&self, id: ObjectId) -> AppResult<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn replace_category(&self, category: &Category) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        ensure_category_name_free(&tables.categories, category)?;
        replace_by_id(&mut tables.categories, category, |c| c.id, "Category")
    }

    async fn delete_category(&self, id: ObjectId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.categories, |c| c.id == id) > 0)
    }

    async fn insert_vendor(&self, vendor: &Vendor) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if let Some(owner) = vendor.user_id {
            if tables.vendors.iter().any(|v| v.is_owned_by(owner)) {
                return Err(AppError::Conflict("You already have a vendor listing".to_string()));
            }
        }
        tables.vendors.push(vendor.clone());
        Ok(())
    }

    async fn list_vendors(&self) -> AppResult<Vec<Vendor>> {
        Ok(self.tables.read().await.vendors.clone())
    }

    async fn find_vendor(&self, id: ObjectId) -> AppResult<Option<Vendor>> {
        let tables = self.tables.read().await;
        Ok(tables.vendors.iter().find(|v| v.id == id).cloned())
    }

    async fn find_vendor_by_owner(&self, user_id: ObjectId) -> AppResult<Option<Vendor>> {
        let tables = self.tables.read().await;
        Ok(tables.vendors.iter().find(|v| v.is_owned_by(user_id)).cloned())
    }

    async fn update_vendor_details(&self, vendor: &Vendor) -> AppResult<Option<Vendor>> {
        let mut tables = self.tables.write().await;
        Ok(tables.vendors.iter_mut().find(|v| v.id == vendor.id).map(|stored| {
            stored.copy_details_from(vendor);
            stored.clone()
        }))
    }

    async fn set_vendor_status(
        &self,
        id: ObjectId,
        status: VendorStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Vendor>> {
        let mut tables = self.tables.write().await;
        Ok(tables.vendors.iter_mut().find(|v| v.id == id).map(|stored| {
            stored.status = status;
            stored.updated_at = updated_at;
            stored.clone()
        }))
    }

    async fn set_vendor_rating(&self, id: ObjectId, rating: Option<f64>, review_count: i64) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        match tables.vendors.iter_mut().find(|v| v.id == id) {
            Some(stored) => {
                stored.rating = rating;
                stored.review_count = review_count;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn rename_vendor_category(&self, category_id: ObjectId, name: &str) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        let mut renamed = 0;
        for vendor in tables.vendors.iter_mut().filter(|v| v.category_id == Some(category_id)) {
            vendor.category = name.to_string();
            renamed += 1;
        }
        Ok(renamed)
    }

    async fn delete_vendor(&self, id: ObjectId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.vendors, |v| v.id == id) > 0)
    }

    async fn insert_review(&self, review: &Review) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .reviews
            .iter()
            .any(|r| r.user_id == review.user_id && r.vendor_id == review.vendor_id)
        {
            return Err(AppError::Conflict("You have already reviewed this vendor".to_string()));
        }
        tables.reviews.push(review.clone());
        Ok(())
    }

    async fn list_reviews(&self) -> AppResult<Vec<Review>> {
        Ok(self.tables.read().await.reviews.clone())
    }

    async fn list_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<Vec<Review>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    async fn list_reviews_by_user(&self, user_id: ObjectId) -> AppResult<Vec<Review>> {
        let tables = self.tables.read().await;
        Ok(tables
            .reviews
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_review(&self, id: ObjectId) -> AppResult<Option<Review>> {
        let tables = self.tables.read().await;
        Ok(tables.reviews.iter().find(|r| r.id == id).cloned())
    }

    async fn replace_review(&self, review: &Review) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        replace_by_id(&mut tables.reviews, review, |r| r.id, "Review")
    }

    async fn delete_review(&self, id: ObjectId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.reviews, |r| r.id == id) > 0)
    }

    async fn delete_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.reviews, |r| r.vendor_id == vendor_id))
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.tables.write().await.polls.push(poll.clone());
        Ok(())
    }

    async fn list_polls(&self) -> AppResult<Vec<Poll>> {
        Ok(self.tables.read().await.polls.clone())
    }

    async fn find_poll(&self, id: ObjectId) -> AppResult<Option<Poll>> {
        let tables = self.tables.read().await;
        Ok(tables.polls.iter().find(|p| p.id == id).cloned())
    }

    async fn set_poll_status(&self, id: ObjectId, status: PollStatus) -> AppResult<Option<Poll>> {
        let mut tables = self.tables.write().await;
        Ok(tables.polls.iter_mut().find(|p| p.id == id).map(|stored| {
            stored.status = status;
            stored.clone()
        }))
    }

    async fn delete_poll(&self, id: ObjectId) -> AppResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.polls, |p| p.id == id) > 0)
    }

    async fn increment_poll_vote(&self, poll_id: ObjectId, option_index: usize) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        let poll = tables
            .polls
            .iter_mut()
            .find(|p| p.id == poll_id)
            .ok_or_else(|| AppError::NotFound("Poll not found".to_string()))?;

        if poll.votes.len() <= option_index {
            poll.votes.resize(option_index + 1, 0);
        }
        poll.votes[option_index] += 1;
        Ok(())
    }

    async fn insert_vote(&self, vote: &VoteRecord) -> AppResult<()> {
        let mut tables = self.tables.write().await;
        if tables
            .poll_votes
            .iter()
            .any(|v| v.poll_id == vote.poll_id && v.user_id == vote.user_id)
        {
            return Err(AppError::Conflict("You have already voted in this poll".to_string()));
        }
        tables.poll_votes.push(vote.clone());
        Ok(())
    }

    async fn find_vote(&self, poll_id: ObjectId, user_id: ObjectId) -> AppResult<Option<VoteRecord>> {
        let tables = self.tables.read().await;
        Ok(tables
            .poll_votes
            .iter()
            .find(|v| v.poll_id == poll_id && v.user_id == user_id)
            .cloned())
    }

    async fn list_votes(&self) -> AppResult<Vec<VoteRecord>> {
        Ok(self.tables.read().await.poll_votes.clone())
    }

    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<u64> {
        let mut tables = self.tables.write().await;
        Ok(remove_where(&mut tables.poll_votes, |v| v.poll_id == poll_id))
    }
}
