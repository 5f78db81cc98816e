use axum::{extract::State, Json};

use crate::controllers::category_controllers::models::CategoryResponse;
use crate::state::AppState;
use crate::utils::error::AppResult;

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<CategoryResponse>>> {
    let mut categories = state.store.list_categories().await?;
    categories.sort_by_key(|c| c.name.to_lowercase());

    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}
