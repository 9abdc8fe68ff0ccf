//! Page route configuration.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::state::AppState;
use crate::web::handlers::{
    copy_handler, download_handler, generate_handler, index_handler, login_page_handler,
    login_submit_handler, logout_handler, my_stories_handler, reset_handler, select_genre_handler,
    signup_submit_handler,
};
use crate::web::middleware::rate_limit::{self, RateLimit};
use crate::web::middleware::visitor_session;

/// Credential submissions, rate limited per client IP.
///
/// # Endpoints
///
/// - `POST /login`
/// - `POST /signup`
fn credential_routes(limit: RateLimit) -> Router<AppState> {
    let routes = Router::new()
        .route("/login", post(login_submit_handler))
        .route("/signup", post(signup_submit_handler));

    match limit {
        RateLimit::Disabled => routes,
        RateLimit::PeerIp => routes.layer(rate_limit::layer()),
        RateLimit::ForwardedIp => routes.layer(rate_limit::proxied_layer()),
    }
}

/// Pages and form actions that work on the visitor session.
///
/// Wrapped in [`visitor_session::layer`].
///
/// # Endpoints
///
/// - `GET /login.html` - Login / signup page
/// - `POST /login`, `POST /signup` - Credential forms
/// - `GET /index.html` - Story generator page
/// - `POST /generate`, `/genre`, `/reset`, `/copy`, `/logout` - Story page actions
/// - `GET /download` - Current story as a text file
/// - `GET /my-stories.html` - Recent stories
pub fn page_routes(state: AppState, limit: RateLimit) -> Router<AppState> {
    Router::new()
        .route("/login.html", get(login_page_handler))
        .merge(credential_routes(limit))
        .route("/index.html", get(index_handler))
        .route("/generate", post(generate_handler))
        .route("/genre", post(select_genre_handler))
        .route("/reset", post(reset_handler))
        .route("/copy", post(copy_handler))
        .route("/download", get(download_handler))
        .route("/logout", post(logout_handler))
        .route("/my-stories.html", get(my_stories_handler))
        .route_layer(middleware::from_fn_with_state(
            state,
            visitor_session::layer,
        ))
}
