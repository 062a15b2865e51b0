use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use super::middleware::logging_middleware;
use super::state::AppState;
use super::{health, images, users};
use crate::config::AppConfig;

/// Plain-text body served at `/`
pub const ROOT_BANNER: &str = "User Management API";

/// Room for multipart boundaries and part headers on top of the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 16 * 1024;

/// Requests running longer than `timeout` are answered with 408
fn request_timeout(timeout: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout)
}

/// Routes under `/user`
fn create_user_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/create", post(users::create_user))
        .route("/update", put(users::update_user))
        .route("/delete", delete(users::delete_user))
        .route("/getAll", get(users::list_users))
        .route(
            "/uploadImage",
            post(images::upload_image)
                .layer(DefaultBodyLimit::max(max_upload_bytes + MULTIPART_OVERHEAD_BYTES)),
        )
}

/// Create the full router with application state
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/", get(|| async { ROOT_BANNER }))
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        .nest("/user", create_user_router(config.uploads.max_file_size_bytes))
        // Add state and middleware
        .with_state(state)
        .layer(request_timeout(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}
