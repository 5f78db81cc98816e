use axum::{extract::State, response::Response};
use serde_json::json;

use crate::{
    controllers::auth_controllers::with_cookie,
    state::AppState,
    utils::{error::AppResult, session},
};

pub async fn logout(State(state): State<AppState>) -> AppResult<Response> {
    with_cookie(
        json!({
            "success": true,
            "message": "Logged out successfully"
        }),
        &session::clear_session_cookie(&state.config.session),
    )
}
