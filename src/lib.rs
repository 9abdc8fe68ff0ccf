//! # PlotPilot Web
//!
//! Server-rendered front end for the PlotPilot AI story generator, built with
//! Axum and Askama.
//!
//! The browser never talks to the story backend directly. Each page is an
//! HTML form; each form post runs a page controller that calls the backend
//! with the visitor's own backend cookies and redirects to the page that
//! shows the result.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Forms, validation, stories, backend trait
//! - **Application Layer** ([`application`]) - Login and story page controllers
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP backend client, session stores
//! - **Web Layer** ([`web`]) - Routes, handlers, templates, middleware
//!
//! ## Features
//!
//! - Login / signup with client-side-style validation messages
//! - Story generation with genre theming, copy, download and reset
//! - Recent stories list
//! - Signed visitor session cookie, Redis or in-memory storage
//! - Rate limiting on credential posts and request tracing
//!
//! ## Quick Start
//!
//! ```bash
//! export BACKEND_URL="http://127.0.0.1:5000"
//! export SESSION_SIGNING_SECRET="change-me"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, StoryService};
    pub use crate::domain::{
        BackendCookies, GeneratedStory, StoryBackend, StoryForm, VisitorSession,
    };
    pub use crate::error::AppError;
    pub use crate::infrastructure::backend::HttpBackend;
    pub use crate::infrastructure::session::{MemorySessionStore, SessionCookie};
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
    pub use crate::web::middleware::rate_limit::RateLimit;
}
