//! HTTP middleware for page requests.
//!
//! Provides visitor sessions, rate limiting, and observability middleware.

pub mod rate_limit;
pub mod tracing;
pub mod visitor_session;

pub use visitor_session::SessionHandle;
