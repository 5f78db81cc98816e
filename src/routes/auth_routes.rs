use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controllers::{check_access, login, logout, me, signup};
use crate::middleware::jwt::jwt_auth;
use crate::state::AppState;

pub fn auth_routes(state: AppState) -> Router {
    Router::new()
        .route("/me", get(me::me))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth))
        .route("/signup", post(signup::signup))
        .route("/login", post(login::login))
        .route("/logout", post(logout::logout))
        .route("/access", get(check_access::check_access))
        .with_state(state)
}
