//! API route configuration

use axum::{
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use super::handlers::{self, AppState};

/// Build the service router
pub fn build_router(state: AppState) -> Router {
    let max_body_bytes = state.config.server.max_body_bytes;

    Router::new()
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .route("/api/v1/recommendations", post(handlers::recommend))
        .route("/api/v1/feedback", post(handlers::feedback))
        .route("/api/v1/emotion", post(handlers::observe_emotion))
        .route("/api/v1/profile/:user_id", get(handlers::get_profile))
        .route(
            "/api/v1/profile/:user_id/settings",
            put(handlers::update_profile_settings),
        )
        .route("/api/v1/content", post(handlers::upsert_content))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
