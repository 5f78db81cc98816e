pub mod mine;
pub mod models;
pub mod moderation;
pub mod submit;

use mongodb::bson::oid::ObjectId;
use tracing::debug;

use crate::db::store::Store;
use crate::models::review_models::rating_summary;
use crate::utils::error::AppResult;

/// Recomputes the cached rating and review count of a vendor from its
/// approved reviews. A vendor that no longer exists is skipped.
pub async fn refresh_vendor_rating(store: &dyn Store, vendor_id: ObjectId) -> AppResult<()> {
    let reviews = store.list_reviews_for_vendor(vendor_id).await?;
    let (rating, review_count) = rating_summary(&reviews);

    if store.set_vendor_rating(vendor_id, rating, review_count).await? {
        debug!(vendor_id = %vendor_id, ?rating, review_count, "vendor rating refreshed");
    }

    Ok(())
}
