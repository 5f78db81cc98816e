use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::controllers::poll_controllers::{cast_vote, check_vote, get_poll, get_results, polls};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn poll_routes(state: AppState) -> Router {
    Router::new()
        .route("/:pollId/vote", post(cast_vote::cast_vote))
        .route("/:pollId/my-vote", get(check_vote::check_user_vote))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth))
        .route("/", get(polls::get_all_polls))
        .route("/:pollId", get(get_poll::get_poll))
        .route("/:pollId/results", get(get_results::get_results))
        .with_state(state)
}
