//! # api-adapters
//!
//! The web routing and orchestration layer for wingmate. Everything in
//! this crate sits behind the `web-axum` feature; the handlers only
//! talk to the service layer, never to a store directly.

#[cfg(feature = "web-axum")]
pub mod dto;
#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod handlers;
#[cfg(feature = "web-axum")]
pub mod middleware;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use state::AppState;

#[cfg(feature = "web-axum")]
use axum::{
    routing::{get, post},
    Router,
};

/// Builds the full API router.
///
/// Paths and field casing are the wire contract the mobile client
/// already speaks; changing either is a breaking change.
#[cfg(feature = "web-axum")]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/auth/register", post(handlers::register))
        .route("/auth/login", post(handlers::login))
        .route(
            "/profiles/{id}",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route("/discovery/{id}", get(handlers::discovery))
        .route("/swipes", post(handlers::create_swipe))
        .route("/matches/{id}", get(handlers::list_matches))
        .route("/friends/add", post(handlers::add_friend))
        .route("/friends/{id}", get(handlers::list_friends))
        .route("/push", post(handlers::push))
        .route("/pull", post(handlers::pull))
        .route(
            "/chats/{match_id}/messages",
            get(handlers::list_messages).post(handlers::post_message),
        )
        .layer(middleware::trace_layer())
        .layer(middleware::cors_policy())
        .with_state(state)
}
