use std::sync::Arc;

use crate::application::services::{AuthService, StoryService};
use crate::domain::StoryBackend;
use crate::infrastructure::session::{SessionCookie, SessionStore};

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub story_service: Arc<StoryService>,
    pub sessions: Arc<dyn SessionStore>,
    pub session_cookie: SessionCookie,
}

impl AppState {
    /// Wires both page controllers to the same backend.
    pub fn new(
        backend: Arc<dyn StoryBackend>,
        sessions: Arc<dyn SessionStore>,
        session_cookie: SessionCookie,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(backend.clone())),
            story_service: Arc::new(StoryService::new(backend)),
            sessions,
            session_cookie,
        }
    }
}
