//! Page controllers for the application layer.

pub mod auth_service;
pub mod story_service;

pub use auth_service::{AuthOutcome, AuthPage, AuthService};
pub use story_service::{
    GenerateOutcome, LogoutOutcome, RecentStories, SessionView, StoryDownload, StoryService,
};

/// Story generator page.
pub const INDEX_PAGE: &str = "/index.html";

/// Login / signup page.
pub const LOGIN_PAGE: &str = "/login.html";

/// Shown for any transport or decoding failure.
pub const NETWORK_ERROR: &str = "Network error. Please check your connection and try again.";
