use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::controllers::review_controllers::{mine, submit};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn review_routes(state: AppState) -> Router {
    Router::new()
        .route("/", post(submit::submit_review))
        .route("/quick", post(submit::quick_review))
        .route("/mine", get(mine::my_reviews))
        .route("/:reviewId", put(mine::update_review).delete(mine::delete_review))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}
