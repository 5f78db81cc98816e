use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, to_bson, Document},
    error::{ErrorKind, WriteFailure},
    options::{Collation, CollationStrength, IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use serde::{de::DeserializeOwned, Serialize};
use tracing::info;

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

const DUPLICATE_KEY: i32 = 11000;

/// [`Store`] over MongoDB collections, one per table.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    fn accounts(&self) -> Collection<Account> {
        self.db.collection("accounts")
    }

    fn profiles(&self) -> Collection<Profile> {
        self.db.collection("profiles")
    }

    fn user_roles(&self) -> Collection<UserRole> {
        self.db.collection("user_roles")
    }

    fn categories(&self) -> Collection<Category> {
        self.db.collection("categories")
    }

    fn vendors(&self) -> Collection<Vendor> {
        self.db.collection("vendors")
    }

    fn reviews(&self) -> Collection<Review> {
        self.db.collection("reviews")
    }

    fn polls(&self) -> Collection<Poll> {
        self.db.collection("polls")
    }

    fn poll_votes(&self) -> Collection<VoteRecord> {
        self.db.collection("poll_votes")
    }

    /// Creates the unique indexes the uniqueness rules rely on.
    ///
    /// # Errors
    ///
    /// Fails if MongoDB rejects an index, e.g. existing duplicates.
    pub async fn ensure_indexes(&self) -> AppResult<()> {
        self.accounts().create_index(unique_index(doc! { "email": 1 })).await?;
        self.user_roles()
            .create_index(unique_index(doc! { "user_id": 1, "role": 1 }))
            .await?;
        self.reviews()
            .create_index(unique_index(doc! { "user_id": 1, "vendor_id": 1 }))
            .await?;
        self.poll_votes()
            .create_index(unique_index(doc! { "poll_id": 1, "user_id": 1 }))
            .await?;

        // One listing per owner; unowned listings are exempt.
        let one_listing = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .partial_filter_expression(doc! { "user_id": { "$type": "objectId" } })
                    .build(),
            )
            .build();
        self.vendors().create_index(one_listing).await?;

        let category_name = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .collation(
                        Collation::builder()
                            .locale("en")
                            .strength(CollationStrength::Secondary)
                            .build(),
                    )
                    .build(),
            )
            .build();
        self.categories().create_index(category_name).await?;

        info!("MongoDB indexes ensured");
        Ok(())
    }
}

fn unique_index(keys: Document) -> IndexModel {
    IndexModel::builder()
        .keys(keys)
        .options(IndexOptions::builder().unique(true).build())
        .build()
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == DUPLICATE_KEY,
        _ => false,
    }
}

fn conflict_on_duplicate(err: mongodb::error::Error, message: &str) -> AppError {
    if is_duplicate_key(&err) {
        AppError::Conflict(message.to_string())
    } else {
        err.into()
    }
}

/// Insert that turns a unique-index violation into `Conflict(message)`.
async fn insert_unique<T>(coll: &Collection<T>, row: &T, message: &str) -> AppResult<()>
where
    T: Serialize + Send + Sync,
{
    coll.insert_one(row)
        .await
        .map(|_| ())
        .map_err(|err| conflict_on_duplicate(err, message))
}

/// `$set` on one row, returning the row as written.
async fn set_fields<T>(coll: &Collection<T>, id: ObjectId, fields: Document) -> AppResult<Option<T>>
where
    T: DeserializeOwned + Send + Sync,
{
    Ok(coll
        .find_one_and_update(doc! { "_id": id }, doc! { "$set": fields })
        .return_document(ReturnDocument::After)
        .await?)
}

async fn find_all<T>(coll: &Collection<T>, filter: Document) -> AppResult<Vec<T>>
where
    T: DeserializeOwned + Unpin + Send + Sync,
{
    let cursor = coll.find(filter).await?;
    Ok(cursor.try_collect().await?)
}

async fn replace_by_id<T>(coll: &Collection<T>, id: ObjectId, row: &T, what: &str) -> AppResult<()>
where
    T: Serialize + Send + Sync,
{
    let result = coll.replace_one(doc! { "_id": id }, row).await?;
    if result.matched_count == 0 {
        return Err(AppError::NotFound(format!("{what} not found")));
    }
    Ok(())
}

async fn delete_by_id<T>(coll: &Collection<T>, id: ObjectId) -> AppResult<bool>
where
    T: Send + Sync,
{
    let result = coll.delete_one(doc! { "_id": id }).await?;
    Ok(result.deleted_count > 0)
}

#[async_trait]
impl Store for MongoStore {
    async fn insert_account(&self, account: &Account) -> AppResult<()> {
        insert_unique(&self.accounts(), account, "An account with this email already exists").await
    }

    async fn find_account_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self.accounts().find_one(doc! { "email": email }).await?)
    }

    async fn insert_profile(&self, profile: &Profile) -> AppResult<()> {
        self.profiles().insert_one(profile).await?;
        Ok(())
    }

    async fn find_profile(&self, id: ObjectId) -> AppResult<Option<Profile>> {
        Ok(self.profiles().find_one(doc! { "_id": id }).await?)
    }

    async fn list_profiles(&self) -> AppResult<Vec<Profile>> {
        find_all(&self.profiles(), doc! {}).await
    }

    async fn replace_profile(&self, profile: &Profile) -> AppResult<()> {
        replace_by_id(&self.profiles(), profile.id, profile, "Profile").await
    }

    async fn insert_role(&self, role: &UserRole) -> AppResult<()> {
        let message = format!("User already has the {} role", role.role);
        insert_unique(&self.user_roles(), role, &message).await
    }

    async fn roles_for_user(&self, user_id: ObjectId) -> AppResult<Vec<Role>> {
        let rows = find_all(&self.user_roles(), doc! { "user_id": user_id }).await?;
        Ok(rows.into_iter().map(|row| row.role).collect())
    }

    async fn list_user_roles(&self) -> AppResult<Vec<UserRole>> {
        find_all(&self.user_roles(), doc! {}).await
    }

    async fn delete_role(&self, user_id: ObjectId, role: Role) -> AppResult<bool> {
        let result = self
            .user_roles()
            .delete_one(doc! { "user_id": user_id, "role": role.as_str() })
            .await?;
        Ok(result.deleted_count > 0)
    }

    async fn insert_category(&self, category: &Category) -> AppResult<()> {
        let message = format!("Category '{}' already exists", category.name);
        insert_unique(&self.categories(), category, &message).await
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        find_all(&self.categories(), doc! {}).await
    }

    async fn find_category(&self, id: ObjectId) -> AppResult<Option<Category>> {
        Ok(self.categories().find_one(doc! { "_id": id }).await?)
    }

    async fn replace_category(&self, category: &Category) -> AppResult<()> {
        let message = format!("Category '{}' already exists", category.name);
        let result = self
            .categories()
            .replace_one(doc! { "_id": category.id }, category)
            .await
            .map_err(|err| conflict_on_duplicate(err, &message))?;
        if result.matched_count == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }
        Ok(())
    }

    async fn delete_category(&self, id: ObjectId) -> AppResult<bool> {
        delete_by_id(&self.categories(), id).await
    }

    async fn insert_vendor(&self, vendor: &Vendor) -> AppResult<()> {
        insert_unique(&self.vendors(), vendor, "You already have a vendor listing").await
    }

    async fn list_vendors(&self) -> AppResult<Vec<Vendor>> {
        find_all(&self.vendors(), doc! {}).await
    }

    async fn find_vendor(&self, id: ObjectId) -> AppResult<Option<Vendor>> {
        Ok(self.vendors().find_one(doc! { "_id": id }).await?)
    }

    async fn find_vendor_by_owner(&self, user_id: ObjectId) -> AppResult<Option<Vendor>> {
        Ok(self.vendors().find_one(doc! { "user_id": user_id }).await?)
    }

    async fn update_vendor_details(&self, vendor: &Vendor) -> AppResult<Option<Vendor>> {
        let fields = doc! {
            "business_name": to_bson(&vendor.business_name)?,
            "category": to_bson(&vendor.category)?,
            "category_id": to_bson(&vendor.category_id)?,
            "description": to_bson(&vendor.description)?,
            "email": to_bson(&vendor.email)?,
            "phone": to_bson(&vendor.phone)?,
            "whatsapp": to_bson(&vendor.whatsapp)?,
            "location": to_bson(&vendor.location)?,
            "image_url": to_bson(&vendor.image_url)?,
            "gallery": to_bson(&vendor.gallery)?,
            "preferred_contact": to_bson(&vendor.preferred_contact)?,
            "updated_at": to_bson(&vendor.updated_at)?,
        };
        set_fields(&self.vendors(), vendor.id, fields).await
    }

    async fn set_vendor_status(
        &self,
        id: ObjectId,
        status: VendorStatus,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<Vendor>> {
        let fields = doc! {
            "status": to_bson(&status)?,
            "updated_at": to_bson(&updated_at)?,
        };
        set_fields(&self.vendors(), id, fields).await
    }

    async fn set_vendor_rating(&self, id: ObjectId, rating: Option<f64>, review_count: i64) -> AppResult<bool> {
        let result = self
            .vendors()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": { "rating": rating, "review_count": review_count } },
            )
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn rename_vendor_category(&self, category_id: ObjectId, name: &str) -> AppResult<u64> {
        let result = self
            .vendors()
            .update_many(
                doc! { "category_id": category_id },
                doc! { "$set": { "category": name } },
            )
            .await?;
        Ok(result.modified_count)
    }

    async fn delete_vendor(&self, id: ObjectId) -> AppResult<bool> {
        delete_by_id(&self.vendors(), id).await
    }

    async fn insert_review(&self, review: &Review) -> AppResult<()> {
        insert_unique(&self.reviews(), review, "You have already reviewed this vendor").await
    }

    async fn list_reviews(&self) -> AppResult<Vec<Review>> {
        find_all(&self.reviews(), doc! {}).await
    }

    async fn list_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<Vec<Review>> {
        find_all(&self.reviews(), doc! { "vendor_id": vendor_id }).await
    }

    async fn list_reviews_by_user(&self, user_id: ObjectId) -> AppResult<Vec<Review>> {
        find_all(&self.reviews(), doc! { "user_id": user_id }).await
    }

    async fn find_review(&self, id: ObjectId) -> AppResult<Option<Review>> {
        Ok(self.reviews().find_one(doc! { "_id": id }).await?)
    }

    async fn replace_review(&self, review: &Review) -> AppResult<()> {
        replace_by_id(&self.reviews(), review.id, review, "Review").await
    }

    async fn delete_review(&self, id: ObjectId) -> AppResult<bool> {
        delete_by_id(&self.reviews(), id).await
    }

    async fn delete_reviews_for_vendor(&self, vendor_id: ObjectId) -> AppResult<u64> {
        let result = self.reviews().delete_many(doc! { "vendor_id": vendor_id }).await?;
        Ok(result.deleted_count)
    }

    async fn insert_poll(&self, poll: &Poll) -> AppResult<()> {
        self.polls().insert_one(poll).await?;
        Ok(())
    }

    async fn list_polls(&self) -> AppResult<Vec<Poll>> {
        find_all(&self.polls(), doc! {}).await
    }

    async fn find_poll(&self, id: ObjectId) -> AppResult<Option<Poll>> {
        Ok(self.polls().find_one(doc! { "_id": id }).await?)
    }

    async fn set_poll_status(&self, id: ObjectId, status: PollStatus) -> AppResult<Option<Poll>> {
        set_fields(&self.polls(), id, doc! { "status": to_bson(&status)? }).await
    }

    async fn delete_poll(&self, id: ObjectId) -> AppResult<bool> {
        delete_by_id(&self.polls(), id).await
    }

    async fn increment_poll_vote(&self, poll_id: ObjectId, option_index: usize) -> AppResult<()> {
        let mut counter = Document::new();
        counter.insert(format!("votes.{option_index}"), 1_i64);

        let result = self
            .polls()
            .update_one(doc! { "_id": poll_id }, doc! { "$inc": counter })
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound("Poll not found".to_string()));
        }
        Ok(())
    }

    async fn insert_vote(&self, vote: &VoteRecord) -> AppResult<()> {
        insert_unique(&self.poll_votes(), vote, "You have already voted in this poll").await
    }

    async fn find_vote(&self, poll_id: ObjectId, user_id: ObjectId) -> AppResult<Option<VoteRecord>> {
        Ok(self
            .poll_votes()
            .find_one(doc! { "poll_id": poll_id, "user_id": user_id })
            .await?)
    }

    async fn list_votes(&self) -> AppResult<Vec<VoteRecord>> {
        find_all(&self.poll_votes(), doc! {}).await
    }

    async fn delete_votes_for_poll(&self, poll_id: ObjectId) -> AppResult<u64> {
        let result = self.poll_votes().delete_many(doc! { "poll_id": poll_id }).await?;
        Ok(result.deleted_count)
    }
}
