use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::controllers::vendor_controllers::{directory, listing};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn vendor_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/me",
            get(listing::my_listing)
                .post(listing::create_listing)
                .put(listing::update_listing),
        )
        .route("/me/reviews", get(listing::my_listing_reviews))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth))
        .route("/", get(directory::list_directory))
        .route("/:vendorId", get(directory::get_vendor))
        .route("/:vendorId/reviews", get(directory::vendor_reviews))
        .with_state(state)
}
