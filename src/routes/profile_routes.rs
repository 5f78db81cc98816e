use axum::{middleware::from_fn_with_state, routing::get, Router};

use crate::controllers::profile_controllers::profile;
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn profile_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(profile::get_profile).put(profile::update_profile))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth))
        .with_state(state)
}
