//! Web layer for the browser-facing pages.
//!
//! Renders the login and story pages with Askama templates and turns form
//! posts into page controller calls.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering and form handlers
//! - [`middleware`] - Visitor session, rate limiting, tracing
//! - [`routes`] - Page route configuration

pub mod handlers;
pub mod middleware;
pub mod routes;
