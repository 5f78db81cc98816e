//! Test store that lands one concurrent write right after a handler reads a
//! row, the way a parallel request would.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;

use crate::controllers::review_controllers::refresh_vendor_rating;
use crate::db::{memory_store::MemoryStore, store::Store};
use crate::models::{
    category_models::Category,
    poll_models::{Poll, PollStatus},
    review_models::{Review, ReviewStatus},
    role_models::{Role, UserRole},
    user_models::{Account, Profile},
    vendor_models::{Vendor, VendorStatus},
    vote_record_models::VoteRecord,
};
use crate::utils::error::AppResult;

#[derive(Debug, Clone, Copy)]
pub(crate) enum Interleave {
    /// A vote for option 0 after the poll is read.
    VoteAfterPollRead,
    /// An approved 5-star review, with its rating refresh, after the vendor
    /// is read.
    ReviewAfterVendorRead,
}

pub(crate) struct InterleavingStore {
    pub(crate) inner: MemoryStore,
    interleave: Interleave,
    armed: AtomicBool,
}

impl InterleavingStore {
    pub(crate) fn new(inner: MemoryStore, interleave: Interleave) -> Self {
        Self {
            inner,
            interleave,
            armed: AtomicBool::new(false),
        }
    }

    /// Fires the interleaved write on the next matching read.
    pub(crate) fn arm(&self) {
        self.armed.store(true, Ordering::SeqCst);
    }

    fn fire(&self, wanted: fn(Interleave) -> bool) -> bool {
        wanted(self.interleave) && self.armed.swap(false, Ordering::SeqCst)
    }

    async fn after_vendor_read(&self, vendor: &Option<Vendor>) -> AppResult<()> {
        let Some(vendor) = vendor else {
            return Ok(());
        };
        if self.fire(|i| matches!(i, Interleave::ReviewAfterVendorRead)) {
            let now = Utc::now();
            let review = Review {
                id: ObjectId::new(),
                user_id: ObjectId::new(),
                vendor_id: vendor.id,
                rating: 5,
                comment: None,
                status: ReviewStatus::Approved,
                created_at: now,
                updated_at: now,
            };
            self.inner.insert_review(&review).await?;
            refresh_vendor_rating(&self.inner, vendor.id).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Store for InterleavingStore {
    async fn insert_account(&self, account: &Account) -> AppResult<()> {
        self.inner.insert_account(account).await
    }

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.inner.find_account_by_email(email).await
    }

    async fn insert_profile(&self, profile: &Profile) -> AppResult<()> {
        self.inner.insert_profile(profile).await
    }

    async fn find_profile(&self, id: ObjectId) -> AppResult<Option<Profile>> {
        self.inner.find_profile(id).await
    }

    async fn list_profiles(&self) -> AppResult<Vec<Profile>> {
        self.inner.list_profiles().await
    }

    async fn replace_profile(&self, profile: &Profile) -> AppResult<()> {
        self.inner.replace_profile(profile).await
    }

    async fn insert_role(&self, role: &UserRole) -> AppResult<()> {
        self.inner.insert_role(role).await
    }

    async fn roles_for_user(&self, user_id: ObjectId) -> AppResult<Vec<Role>> {
        self.inner.roles_for_user(user_id).await
    }

    async fn list_user_roles(&self) -> AppResult<Vec<UserRole>> {
        self.inner.list_user_roles().await
    }

    async fn delete_role(&self, user_id: ObjectId, role: Role) -> AppResult<bool> {
        self.inner.delete_role(user_id, role).await
    }

    async fn insert_category(&self, category: &Category) -> AppResult<()> {
        self.inner.insert_category(category).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.inner.list_categories().await
    }

    async fn find_category(&self, id: ObjectId) -> AppResult<Option<Category>> {
        self.inner.find_category(id).await
    }

    async fn replace_category(&self, category: &Category) -> AppResult<()> {
        self.inner.replace_category(category).await
    }

    async fn delete_category(&self, id: ObjectId) -> AppResult<bool> {
        self.inner.delete_category(id).await
    }

    async fn insert_vendor(&self, vendor: &Vendor) -> AppResult<()> {
        self.inner.insert_vendor(vendor).await
    }

    async fn list_vendors(&self) -> AppResult<Vec<Vendor>> {
        self.inner.list_vendors().await
    }

    async fn find_vendor(&self, id: ObjectId) -> AppResult<Option<Vendor>> {
        let vendor = self.inner.find_vendor(id).await?;
        self.after_vendor_read(&vendor).await?;
        Ok(vendor)
    }

    async fn find_vendor_by_owner(&self, user_id: ObjectId) -> AppResult<Option<Vendor>> {
        let vendor = self.inner.find_vendor_by_owner(user_id).await?;
        self.after_vendor_read(&vendor).await?;
        Ok(vendor)
    }

    async fn update_vendor_details(&self, vendor: &Vendor) -> AppResult<Option<Vendor>> {
        self.inner.update_vendor_details(vendor).await
    }

    async fn set_vendor_status(
        &self,
        id: ObjectId,
        status: VendorStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Vendor>> {
        self.inner.set_vendor_status(id, status, updated_at).await
    }

    async fn set_vendor_rating(&self, id: ObjectId, rating: Option<f64>, review_count: i64) -> AppResult<bool> {
        self.inner.set_vendor_rating(id, rating, review_count).await
    }

    async fn rename_vendor_category(&self, category_id: ObjectId, name: &str) -> AppResult<u64> {
        self.inner.rename_vendor_category(category_id, name).await
    }

    async fn delete_vendor(&self, id: ObjectId) -> AppResult<bool> {
        self.inner.delete_vendor(id).await
    }

    async fn insert_review(&self, review: &Review) -> AppResult<()> {
        self.inner.insert_review(review).await
    }

    async fn list_reviews(&self) -> AppResult<Vec<Review>> {
        self.inner.list_reviews().await
    }

    async fn list_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<Vec<Review>> {
        self.inner.list_reviews_for_vendor(vendor_id).await
    }

    async fn list_reviews_by_user(&self, user_id: ObjectId) -> AppResult<Vec<Review>> {
        self.inner.list_reviews_by_user(user_id).await
    }

    async fn find_review(&self, id: ObjectId) -> AppResult<Option<Review>> {
        self.inner.find_review(id).await
    }

    async fn replace_review(&self, review: &Review) -> AppResult<()> {
        self.inner.replace_review(review).await
    }

    async fn delete_review(&self, id: ObjectId) -> AppResult<bool> {
        self.inner.delete_review(id).await
    }

    async fn delete_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<u64> {
        self.inner.delete_reviews_for_vendor(vendor_id).await
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.inner.insert_poll(poll).await
    }

    async fn list_polls(&self) -> AppResult<Vec<Poll>> {
        self.inner.list_polls().await
    }

    async fn find_poll(&self, id: ObjectId) -> AppResult<Option<Poll>> {
        let poll = self.inner.find_poll(id).await?;
        if poll.is_some() && self.fire(|i| matches!(i, Interleave::VoteAfterPollRead)) {
            self.inner.increment_poll_vote(id, 0).await?;
        }
        Ok(poll)
    }

    async fn set_poll_status(&self, id: ObjectId, status: PollStatus) -> AppResult<Option<Poll>> {
        self.inner.set_poll_status(id, status).await
    }

    async fn delete_poll(&self, id: ObjectId) -> AppResult<bool> {
        self.inner.delete_poll(id).await
    }

    async fn increment_poll_vote(&self, poll_id: ObjectId, option_index: usize) -> AppResult<()> {
        self.inner.increment_poll_vote(poll_id, option_index).await
    }

    async fn insert_vote(&self, vote: &VoteRecord) -> AppResult<()> {
        self.inner.insert_vote(vote).await
    }

    async fn find_vote(&self, poll_id: ObjectId, user_id: ObjectId) -> AppResult<Option<VoteRecord>> {
        self.inner.find_vote(poll_id, user_id).await
    }

    async fn list_votes(&self) -> AppResult<Vec<VoteRecord>> {
        self.inner.list_votes().await
    }

    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<u64> {
        self.inner.delete_votes_for_poll(poll_id).await
    }
}
