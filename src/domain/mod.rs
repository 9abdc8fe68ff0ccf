//! Domain layer: page state, forms, validation and the backend contract.
//!
//! Nothing in this layer performs I/O. The page controllers in
//! [`crate::application::services`] combine these types with a
//! [`backend::StoryBackend`] implementation.
//!
//! # Modules
//!
//! - [`forms`] - Login, signup and story generator forms with their validation
//! - [`validation`] - User-facing validation errors
//! - [`story`] - Generated story, content panel and copy/download text
//! - [`session`] - Per-visitor state kept between requests
//! - [`cookies`] - Backend cookie jar carried on behalf of a visitor
//! - [`backend`] - Backend endpoint DTOs and the [`backend::StoryBackend`] trait

pub mod backend;
pub mod cookies;
pub mod forms;
pub mod session;
pub mod story;
pub mod validation;

pub use backend::{BackendError, BackendReply, BackendResult, StoryBackend};
pub use cookies::BackendCookies;
pub use forms::{AuthPanel, Genre, Length, LoginForm, SignupForm, StoryForm, Theme};
pub use session::VisitorSession;
pub use story::{GeneratedStory, StoryPanel, StorySummary};
pub use validation::ValidationError;

#[cfg(test)]
pub use backend::MockStoryBackend;
