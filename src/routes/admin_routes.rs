use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};

use crate::controllers::{
    admin_controllers::{analytics, roles, stats, users},
    category_controllers::manage,
    poll_controllers::{close_poll, create_poll, delete_poll},
    review_controllers::moderation as reviews,
    vendor_controllers::moderation as vendors,
};
use crate::middleware::{jwt::jwt_auth, role::require_admin};
use crate::state::AppState;

/// Every route needs an admin. Role grants additionally check for a super admin.
pub fn admin_routes(state: AppState) -> Router {
    Router::new()
        .route("/stats", get(stats::get_stats))
        .route("/analytics", get(analytics::get_analytics))
        .route("/users", get(users::list_users))
        .route(
            "/users/:userId/admin",
            post(roles::grant_admin).delete(roles::revoke_admin),
        )
        .route("/vendors", get(vendors::list_all_vendors))
        .route("/vendors/:vendorId", delete(vendors::delete_vendor))
        .route("/vendors/:vendorId/status", put(vendors::set_vendor_status))
        .route("/reviews", get(reviews::list_reviews))
        .route("/reviews/:reviewId", delete(reviews::admin_delete_review))
        .route("/reviews/:reviewId/status", put(reviews::set_review_status))
        .route("/reviews/:reviewId/comment", put(reviews::edit_review_comment))
        .route("/categories", post(manage::create_category))
        .route(
            "/categories/:categoryId",
            put(manage::update_category).delete(manage::delete_category),
        )
        .route("/polls", post(create_poll::create_poll))
        .route("/polls/:pollId", delete(delete_poll::delete_poll))
        .route("/polls/:pollId/close", post(close_poll::close_poll))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}
