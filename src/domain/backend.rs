//! Contract with the PlotPilot backend API.
//!
//! The backend owns accounts, sessions, story generation and storage. This
//! module defines the request/response shapes of its JSON endpoints and the
//! [`StoryBackend`] trait the page controllers call.
//!
//! # Endpoints
//!
//! - `POST /api/login`
//! - `POST /api/signup`
//! - `GET  /api/check-session`
//! - `POST /api/logout`
//! - `POST /api/generate`
//! - `GET  /api/my-stories`

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::domain::cookies::BackendCookies;
use crate::domain::story::{GeneratedStory, StorySummary};

/// Errors raised while talking to the backend.
///
/// Every variant is shown to the user as the same network error message.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode backend response (status {status}): {message}")]
    Decode { status: u16, message: String },

    #[error("Backend reply is missing `{0}`")]
    MissingField(&'static str),
}

/// A decoded backend reply.
///
/// The body is decoded whatever the HTTP status; callers branch on
/// `body.success` first and consult `status` only for session expiry.
#[derive(Debug, Clone)]
pub struct BackendReply<T> {
    pub status: u16,
    pub body: T,
    /// The visitor's cookie jar after applying the reply's `Set-Cookie` headers.
    pub cookies: BackendCookies,
}

impl<T> BackendReply<T> {
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

pub type BackendResult<T> = Result<BackendReply<T>, BackendError>;

/// `POST /api/login` body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// `POST /api/signup` body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// `POST /api/generate` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub character_name: String,
    pub theme: String,
    pub genre: String,
    pub location: String,
    pub length: String,
}

/// Reply of the login and signup endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

/// Reply of `GET /api/check-session`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub logged_in: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// Reply of `POST /api/logout`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogoutReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Reply of `POST /api/generate`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub story: Option<String>,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

impl GenerateReply {
    /// Converts a successful reply into the displayed story.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::MissingField`] if the reply carries no story text.
    pub fn into_story(self) -> Result<GeneratedStory, BackendError> {
        let story = self.story.ok_or(BackendError::MissingField("story"))?;

        Ok(GeneratedStory {
            story,
            character: self.character.unwrap_or_default(),
            theme: self.theme.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            location: self.location.unwrap_or_default(),
        })
    }
}

/// Reply of `GET /api/my-stories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoriesReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub stories: Vec<StorySummary>,
}

/// Client interface to the PlotPilot backend.
///
/// Each call sends the visitor's cookie jar and returns the updated jar in
/// the reply. There are no timeouts and no retries: one call per user
/// action, and the last reply wins.
///
/// # Implementations
///
/// - [`crate::infrastructure::backend::HttpBackend`] - reqwest over HTTP
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoryBackend: Send + Sync {
    /// `POST /api/login`
    async fn login(
        &self,
        cookies: &BackendCookies,
        request: &LoginRequest,
    ) -> BackendResult<AuthReply>;

    /// `POST /api/signup`
    async fn signup(
        &self,
        cookies: &BackendCookies,
        request: &SignupRequest,
    ) -> BackendResult<AuthReply>;

    /// `GET /api/check-session`
    async fn check_session(&self, cookies: &BackendCookies) -> BackendResult<SessionReply>;

    /// `POST /api/logout`
    async fn logout(&self, cookies: &BackendCookies) -> BackendResult<LogoutReply>;

    /// `POST /api/generate`
    async fn generate(
        &self,
        cookies: &BackendCookies,
        request: &GenerateRequest,
    ) -> BackendResult<GenerateReply>;

    /// `GET /api/my-stories`
    async fn my_stories(&self, cookies: &BackendCookies) -> BackendResult<StoriesReply>;
}
