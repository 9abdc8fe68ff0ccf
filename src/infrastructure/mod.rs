//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`backend`] - HTTP client for the PlotPilot backend API
//! - [`session`] - Visitor session storage (Redis and in-memory) and the signed session cookie

pub mod backend;
pub mod session;
