//! Application layer: the page controllers.
//!
//! Controllers validate form input, call the story backend through the
//! [`crate::domain::StoryBackend`] trait and decide what the browser sees
//! next. They never render HTML; handlers in [`crate::web`] do that.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login / signup page
//! - [`services::story_service::StoryService`] - Story generator and recent stories pages

pub mod services;
