//! Controller for the story generator page.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use super::{LOGIN_PAGE, NETWORK_ERROR};
use crate::domain::backend::StoryBackend;
use crate::domain::story::download_filename;
use crate::domain::{BackendCookies, StoryForm, StorySummary, VisitorSession};

const GENERATE_FAILED: &str = "Failed to generate story. Please try again.";
const STORIES_FAILED: &str = "Failed to load your stories. Please try again.";
const ANONYMOUS_NAME: &str = "User";

/// Who is looking at the story page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionView {
    SignedIn { username: String },
    SignedOut,
}

/// Result of the logout button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// Leave for the given page and forget the visitor's state.
    Redirect(&'static str),
    /// The backend refused; the page stays as it is.
    Stay,
}

/// Result of a generate submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The visitor's content panel now shows a story or an error.
    Updated,
    /// The backend session is gone; the browser goes to the login page.
    SessionExpired,
}

/// Result of loading the recent stories list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecentStories {
    Listed(Vec<StorySummary>),
    Failed(String),
    SessionExpired,
}

/// A story packaged as a text file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryDownload {
    pub filename: String,
    pub contents: String,
}

/// Drives the story generator page.
///
/// Operations that touch page state take the visitor's whole
/// [`VisitorSession`]; the caller stores it back afterwards, so the reply
/// that arrives last wins.
pub struct StoryService {
    backend: Arc<dyn StoryBackend>,
}

impl StoryService {
    pub fn new(backend: Arc<dyn StoryBackend>) -> Self {
        Self { backend }
    }

    /// Page load check.
    ///
    /// Signed-out visitors and failed checks both send the browser to the
    /// login page.
    pub async fn check_session(&self, cookies: &mut BackendCookies) -> SessionView {
        match self.backend.check_session(cookies).await {
            Ok(reply) => {
                *cookies = reply.cookies;
                if reply.body.logged_in {
                    SessionView::SignedIn {
                        username: reply
                            .body
                            .username
                            .filter(|name| !name.is_empty())
                            .unwrap_or_else(|| ANONYMOUS_NAME.to_string()),
                    }
                } else {
                    SessionView::SignedOut
                }
            }
            Err(e) => {
                error!("Session check error: {}", e);
                SessionView::SignedOut
            }
        }
    }

    /// Logs the visitor out of the backend.
    pub async fn logout(&self, cookies: &mut BackendCookies) -> LogoutOutcome {
        match self.backend.logout(cookies).await {
            Ok(reply) => {
                *cookies = reply.cookies;
                if reply.body.success {
                    LogoutOutcome::Redirect(LOGIN_PAGE)
                } else {
                    warn!("Backend refused logout");
                    LogoutOutcome::Stay
                }
            }
            Err(e) => {
                error!("Logout error: {}", e);
                LogoutOutcome::Redirect(LOGIN_PAGE)
            }
        }
    }

    /// Validates `form`, asks the backend for a story and updates the panel.
    ///
    /// The submitted values stay in the form whatever the outcome.
    pub async fn generate(&self, session: &mut VisitorSession, form: StoryForm) -> GenerateOutcome {
        session.form = form;
        session.copy_requested = false;

        let request = match session.form.validate() {
            Ok(request) => request,
            Err(e) => {
                session.show_error(e.to_string());
                return GenerateOutcome::Updated;
            }
        };

        let reply = match self.backend.generate(&session.backend, &request).await {
            Ok(reply) => reply,
            Err(e) => {
                error!("Error: {}", e);
                session.show_error(NETWORK_ERROR);
                return GenerateOutcome::Updated;
            }
        };

        session.backend = reply.cookies.clone();

        if reply.body.success {
            match reply.body.into_story() {
                Ok(story) => {
                    info!(
                        character = %story.character,
                        genre = %story.genre,
                        "Story generated"
                    );
                    session.show_story(story);
                }
                Err(e) => {
                    error!("Error: {}", e);
                    session.show_error(NETWORK_ERROR);
                }
            }
            return GenerateOutcome::Updated;
        }

        if reply.is_unauthorized() {
            return GenerateOutcome::SessionExpired;
        }

        session.show_error(
            reply
                .body
                .error
                .unwrap_or_else(|| GENERATE_FAILED.to_string()),
        );
        GenerateOutcome::Updated
    }

    /// Clears the form and the story.
    pub fn reset(&self, session: &mut VisitorSession) {
        session.reset();
    }

    /// Keeps the form as typed after a genre change, without generating.
    ///
    /// The page theme follows `form.genre`; the content panel is untouched.
    pub fn select_genre(&self, session: &mut VisitorSession, form: StoryForm) {
        session.form = form;
        session.copy_requested = false;
    }

    /// Text for the clipboard, if a story is on display.
    ///
    /// Also arms the one-shot "copied" feedback for the next render.
    pub fn copy(&self, session: &mut VisitorSession) -> Option<String> {
        let text = session.current_story()?.copy_text();
        session.copy_requested = true;
        Some(text)
    }

    /// The current story as a `.txt` download named after `now`.
    pub fn download(&self, session: &VisitorSession, now: DateTime<Utc>) -> Option<StoryDownload> {
        let story = session.current_story()?;

        Some(StoryDownload {
            filename: download_filename(now),
            contents: story.download_text(),
        })
    }

    /// The signed-in visitor's most recent stories.
    pub async fn recent_stories(&self, cookies: &mut BackendCookies) -> RecentStories {
        match self.backend.my_stories(cookies).await {
            Ok(reply) => {
                *cookies = reply.cookies.clone();
                if reply.body.success {
                    RecentStories::Listed(reply.body.stories)
                } else if reply.is_unauthorized() {
                    RecentStories::SessionExpired
                } else {
                    RecentStories::Failed(
                        reply
                            .body
                            .error
                            .unwrap_or_else(|| STORIES_FAILED.to_string()),
                    )
                }
            }
            Err(e) => {
                error!("Stories error: {}", e);
                RecentStories::Failed(NETWORK_ERROR.to_string())
            }
        }
    }
}
