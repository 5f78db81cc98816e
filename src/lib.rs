//! Backend of a local vendor marketplace: a directory of vendors rated by
//! users, community polls, and the moderation tools around them.

use std::time::Instant;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    response::Json,
    routing::get,
    Router,
};
use once_cell::sync::Lazy;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod cli;
pub mod config;
pub mod controllers;
pub mod db;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod utils;

pub use config::Config;
pub use logging::{init_logging, Verbosity};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};

static START_TIME: Lazy<Instant> = Lazy::new(Instant::now);

/// Builds the HTTP application over `state`.
///
/// # Errors
///
/// Fails when the configured CORS origin is not a valid header value.
pub fn build_app(state: AppState) -> AppResult<Router> {
    Lazy::force(&START_TIME);

    let origin = state
        .config
        .server
        .cors_origin
        .parse::<HeaderValue>()
        .map_err(|_| {
            AppError::ConfigError(format!(
                "Failed to parse CORS origin: {}",
                state.config.server.cors_origin
            ))
        })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
            header::COOKIE,
            HeaderName::from_static("x-requested-with"),
        ])
        .allow_credentials(true);

    let app = Router::new()
        .route("/", get(root))
        .nest("/api/auth", routes::auth_routes::auth_routes(state.clone()))
        .nest("/api/profile", routes::profile_routes::profile_routes(state.clone()))
        .nest("/api/categories", routes::category_routes::category_routes(state.clone()))
        .nest("/api/vendors", routes::vendor_routes::vendor_routes(state.clone()))
        .nest("/api/reviews", routes::review_routes::review_routes(state.clone()))
        .nest("/api/polls", routes::poll_routes::poll_routes(state.clone()))
        .nest("/api/admin", routes::admin_routes::admin_routes(state))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    Ok(app)
}

fn format_uptime(seconds: u64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours % 24, minutes % 60, seconds % 60)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes % 60, seconds % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{seconds}s")
    }
}

async fn root() -> Json<Value> {
    let uptime = format_uptime(START_TIME.elapsed().as_secs());

    Json(json!({
        "status": "ok",
        "message": format!("Backend is running! Uptime: {uptime}")
    }))
}
