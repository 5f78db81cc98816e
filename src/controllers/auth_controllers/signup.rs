use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use tracing::info;

use crate::{
    controllers::{
        auth_controllers::{
            models::{AuthResponse, SignupRequest},
            with_cookie,
        },
        vendor_controllers::listing::build_listing,
    },
    models::{
        role_models::{Role, UserRole},
        user_models::{Account, Profile},
    },
    state::AppState,
    utils::{
        access::RoleSet,
        error::{AppError, AppResult},
        password::hash_password,
        session,
        validation::{normalize_email, optional_text, require_text, MIN_PASSWORD_LEN},
    },
};

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let email = normalize_email(&body.email)?;

    if body.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::ValidationError(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )));
    }

    let full_name = require_text(&body.full_name, "Full name")?;
    let whatsapp = optional_text(body.whatsapp);

    let user_id = ObjectId::new();

    // Validate the listing before anything is written.
    let listing = match body.vendor {
        Some(request) => Some(build_listing(&state, user_id, &email, request, whatsapp.clone()).await?),
        None => None,
    };

    let now = Utc::now();
    state
        .store
        .insert_account(&Account {
            id: user_id,
            email: email.clone(),
            password_hash: hash_password(&body.password)?,
            created_at: now,
        })
        .await?;

    state
        .store
        .insert_profile(&Profile {
            id: user_id,
            email: email.clone(),
            full_name: Some(full_name.clone()),
            whatsapp,
            avatar_url: None,
            created_at: now,
            updated_at: now,
        })
        .await?;

    let mut roles = vec![Role::User];

    if let Some(vendor) = &listing {
        state.store.insert_vendor(vendor).await?;
        roles.push(Role::Vendor);
        info!(vendor_id = %vendor.id, "vendor listing created, pending approval");
    }

    if state.config.is_bootstrap_admin(&email) {
        roles.extend([Role::Admin, Role::SuperAdmin]);
        info!(%email, "bootstrap super admin signed up");
    }

    for role in &roles {
        state.store.insert_role(&UserRole::new(user_id, *role)).await?;
    }

    let role_set = RoleSet::new(roles);
    let token = session::create_token(&user_id.to_hex(), &state.config.session)?;

    info!(user_id = %user_id, "account created");

    let response = AuthResponse {
        success: true,
        user_id: user_id.to_hex(),
        email,
        full_name: Some(full_name),
        roles: role_set.names(),
        redirect_to: role_set.landing_path().to_string(),
        token: token.clone(),
    };

    let resp = with_cookie(response, &session::session_cookie(&token, &state.config.session))?;
    Ok((StatusCode::CREATED, resp))
}
