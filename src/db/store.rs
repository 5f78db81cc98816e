//! Table access used by the controllers.
//!
//! Two backends implement [`Store`]: MongoDB collections for deployments and
//! process-local tables for development and tests. Both enforce the same
//! uniqueness rules and report violations as [`AppError::Conflict`].
//!
//! [`AppError::Conflict`]: crate::utils::error::AppError::Conflict

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

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

#[async_trait]
pub trait Store: Send + Sync {
    // accounts and profiles

    /// Fails with `Conflict` when the email is taken.
    async fn insert_account(&self, account: &Account) -> AppResult<()>;
    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    async fn insert_profile(&self, profile: &Profile) -> AppResult<()>;
    async fn find_profile(&self, id: ObjectId) -> AppResult<Option<Profile>>;
    async fn list_profiles(&self) -> AppResult<Vec<Profile>>;
    async fn replace_profile(&self, profile: &Profile) -> AppResult<()>;

    // roles

    /// Fails with `Conflict` when the user already holds the role.
    async fn insert_role(&self, role: &UserRole) -> AppResult<()>;
    async fn roles_for_user(&self, user_id: ObjectId) -> AppResult<Vec<Role>>;
    async fn list_user_roles(&self) -> AppResult<Vec<UserRole>>;
    /// Returns whether a row was removed.
    async fn delete_role(&self, user_id: ObjectId, role: Role) -> AppResult<bool>;

    /// Grants `role` unless already held. Returns whether a row was added.
    async fn ensure_role(&self, user_id: ObjectId, role: Role) -> AppResult<bool> {
        match self.insert_role(&UserRole::new(user_id, role)).await {
            Ok(()) => Ok(true),
            Err(AppError::Conflict(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }

    // categories

    /// Fails with `Conflict` when the name is taken, ignoring case.
    async fn insert_category(&self, category: &Category) -> AppResult<()>;
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    async fn find_category(&self, id: ObjectId) -> AppResult<Option<Category>>;
    /// Fails with `Conflict` when another category has the name, ignoring case.
    async fn replace_category(&self, category: &Category) -> AppResult<()>;
    async fn delete_category(&self, id: ObjectId) -> AppResult<bool>;

    // vendors

    /// Fails with `Conflict` when the owner already has a listing.
    async fn insert_vendor(&self, vendor: &Vendor) -> AppResult<()>;
    async fn list_vendors(&self) -> AppResult<Vec<Vendor>>;
    async fn find_vendor(&self, id: ObjectId) -> AppResult<Option<Vendor>>;
    async fn find_vendor_by_owner(&self, user_id: ObjectId) -> AppResult<Option<Vendor>>;
    /// Writes the owner-editable listing fields and `updated_at` of `vendor`.
    /// Status, rating and review count are left as stored. Returns the stored
    /// row after the write, `None` when it does not exist.
    async fn update_vendor_details(&self, vendor: &Vendor) -> AppResult<Option<Vendor>>;
    async fn set_vendor_status(
        &self,
        id: ObjectId,
        status: VendorStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Vendor>>;
    /// Writes only the cached rating and review count.
    async fn set_vendor_rating(&self, id: ObjectId, rating: Option<f64>, review_count: i64) -> AppResult<bool>;
    /// Renames the category of every listing linked to `category_id`.
    async fn rename_vendor_category(&self, category_id: ObjectId, name: &str) -> AppResult<u64>;
    async fn delete_vendor(&self, id: ObjectId) -> AppResult<bool>;

    // reviews

    /// Fails with `Conflict` when the user already reviewed the vendor.
    async fn insert_review(&self, review: &Review) -> AppResult<()>;
    async fn list_reviews(&self) -> AppResult<Vec<Review>>;
    async fn list_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<Vec<Review>>;
    async fn list_reviews_by_user(&self, user_id: ObjectId) -> AppResult<Vec<Review>>;
    async fn find_review(&self, id: ObjectId) -> AppResult<Option<Review>>;
    async fn replace_review(&self, review: &Review) -> AppResult<()>;
    async fn delete_review(&self, id: ObjectId) -> AppResult<bool>;
    async fn delete_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<u64>;

    // polls and votes

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()>;
    async fn list_polls(&self) -> AppResult<Vec<Poll>>;
    async fn find_poll(&self, id: ObjectId) -> AppResult<Option<Poll>>;
    /// Writes only the stored status, leaving the tallies alone.
    async fn set_poll_status(&self, id: ObjectId, status: PollStatus) -> AppResult<Option<Poll>>;
    async fn delete_poll(&self, id: ObjectId) -> AppResult<bool>;
    /// Atomically adds one vote to the counter at `option_index`.
    async fn increment_poll_vote(&self, poll_id: ObjectId, option_index: usize) -> AppResult<()>;

    /// Fails with `Conflict` when the user already voted in the poll.
    async fn insert_vote(&self, vote: &VoteRecord) -> AppResult<()>;
    async fn find_vote(&self, poll_id: ObjectId, user_id: ObjectId) -> AppResult<Option<VoteRecord>>;
    async fn list_votes(&self) -> AppResult<Vec<VoteRecord>>;
    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<u64>;
}
