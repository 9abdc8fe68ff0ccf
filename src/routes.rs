//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`          - Redirect to the story page
//! - `GET  /health`    - Health check: session store (public)
//! - pages             - Login, story and recent stories pages (visitor session)
//! - `/static/*`       - Stylesheets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on credential posts
//! - **Visitor session** - Signed cookie, loaded and saved around each page
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web;
use crate::web::handlers::{health_handler, root_handler};
use crate::web::middleware::rate_limit::RateLimit;
use crate::web::middleware::tracing;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `limit` - how credential posts are rate limited; use
///   [`RateLimit::ForwardedIp`] only behind a trusted reverse proxy
/// - `static_dir` - directory served under `/static`
pub fn app_router(state: AppState, limit: RateLimit, static_dir: &str) -> NormalizePath<Router> {
    let pages = web::routes::page_routes(state.clone(), limit);

    let router = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .merge(pages)
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
