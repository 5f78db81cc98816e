use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use serde_json::{json, Value};
use tracing::info;

use crate::{
    controllers::category_controllers::models::{
        CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest,
    },
    models::category_models::Category,
    state::AppState,
    utils::{
        error::{AppError, AppResult},
        validation::{optional_text, parse_id, require_text},
    },
};

/// Rejects `name` when another category already uses it, ignoring case.
pub fn ensure_unique_name(existing: &[Category], name: &str, except: Option<ObjectId>) -> AppResult<()> {
    let wanted = name.to_lowercase();
    let taken = existing
        .iter()
        .filter(|c| Some(c.id) != except)
        .any(|c| c.name.to_lowercase() == wanted);

    if taken {
        return Err(AppError::Conflict(format!("Category '{name}' already exists")));
    }
    Ok(())
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> AppResult<(StatusCode, Json<CategoryResponse>)> {
    let name = require_text(&payload.name, "Name")?;
    ensure_unique_name(&state.store.list_categories().await?, &name, None)?;

    let category = Category {
        id: ObjectId::new(),
        name,
        description: optional_text(payload.description),
        icon: optional_text(payload.icon),
        created_at: Utc::now(),
    };
    state.store.insert_category(&category).await?;

    info!(category_id = %category.id, name = %category.name, "category created");

    Ok((StatusCode::CREATED, Json(category.into())))
}

pub async fn update_category(
    Path(category_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> AppResult<Json<CategoryResponse>> {
    let category_obj_id = parse_id(&category_id, "category")?;

    let mut category = state
        .store
        .find_category(category_obj_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Category not found".to_string()))?;

    let mut renamed = false;
    if let Some(name) = payload.name {
        let name = require_text(&name, "Name")?;
        ensure_unique_name(&state.store.list_categories().await?, &name, Some(category.id))?;
        renamed = name != category.name;
        category.name = name;
    }
    if payload.description.is_some() {
        category.description = optional_text(payload.description);
    }
    if payload.icon.is_some() {
        category.icon = optional_text(payload.icon);
    }

    state.store.replace_category(&category).await?;

    // Listings linked by id follow the rename.
    if renamed {
        let relabelled = state
            .store
            .rename_vendor_category(category.id, &category.name)
            .await?;
        info!(category_id = %category.id, name = %category.name, relabelled, "category renamed");
    }

    Ok(Json(category.into()))
}

/// Vendors keep their category name when the category row goes away.
pub async fn delete_category(
    Path(category_id): Path<String>,
    State(state): State<AppState>,
) -> AppResult<Json<Value>> {
    let category_obj_id = parse_id(&category_id, "category")?;

    if !state.store.delete_category(category_obj_id).await? {
        return Err(AppError::NotFound("Category not found".to_string()));
    }

    info!(category_id = %category_obj_id, "category deleted");

    Ok(Json(json!({ "success": true, "message": "Category deleted" })))
}
