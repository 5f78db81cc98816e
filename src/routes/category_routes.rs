use axum::{routing::get, Router};

use crate::controllers::category_controllers::list;
use crate::state::AppState;

pub fn category_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(list::list_categories))
        .with_state(state)
}
