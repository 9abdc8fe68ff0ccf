//! Visitor session middleware for page routes.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header::SET_COOKIE},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::domain::VisitorSession;
use crate::error::AppError;
use crate::infrastructure::session::SessionCookie;
use crate::state::AppState;

struct Slot {
    session: VisitorSession,
    destroyed: bool,
}

/// Handle to the current visitor's session, available to handlers as an
/// `Extension<SessionHandle>`.
///
/// Handlers take a snapshot, work on it across backend calls, and store it
/// back with [`SessionHandle::replace`]. The lock is never held across an
/// `.await`.
#[derive(Clone)]
pub struct SessionHandle {
    slot: Arc<Mutex<Slot>>,
}

impl SessionHandle {
    fn new(session: VisitorSession) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                session,
                destroyed: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// A copy of the session as it is now.
    pub fn snapshot(&self) -> VisitorSession {
        self.lock().session.clone()
    }

    /// Stores `session` as the visitor's state.
    pub fn replace(&self, session: VisitorSession) {
        self.lock().session = session;
    }

    /// Forgets the visitor: the session is deleted and the cookie cleared.
    pub fn destroy(&self) {
        let mut slot = self.lock();
        slot.session = VisitorSession::default();
        slot.destroyed = true;
    }

    fn finish(&self) -> Option<VisitorSession> {
        let slot = self.lock();
        if slot.destroyed {
            None
        } else {
            Some(slot.session.clone())
        }
    }
}

/// Loads the visitor session before the handler and persists it afterwards.
///
/// # Flow
///
/// 1. Read and verify the `plotpilot_sid` cookie
/// 2. Load the session from the store; unknown, expired or unreadable
///    sessions start fresh under a new id
/// 3. Run the handler with a [`SessionHandle`] in the request extensions
/// 4. Save the session (refreshing its TTL), or delete it if the handler
///    destroyed it
/// 5. Set the cookie for new sessions, clear it for destroyed ones
///
/// A new session that is still blank after the handler is neither stored
/// nor given a cookie, so anonymous page views leave nothing behind.
///
/// Store failures are logged and never fail the request.
///
/// # Errors
///
/// Returns [`AppError::InvalidHeader`] if the `Set-Cookie` value cannot be
/// encoded.
pub async fn layer(
    State(st): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (id, session, is_new) = match st.session_cookie.session_id(req.headers()) {
        Some(id) => match st.sessions.load(&id).await {
            Ok(Some(session)) => (id, session, false),
            Ok(None) => {
                debug!("Unknown or expired session, starting a new one");
                (SessionCookie::new_session_id(), VisitorSession::default(), true)
            }
            Err(e) => {
                warn!("Failed to load session: {}", e);
                (SessionCookie::new_session_id(), VisitorSession::default(), true)
            }
        },
        None => (SessionCookie::new_session_id(), VisitorSession::default(), true),
    };

    let handle = SessionHandle::new(session);
    req.extensions_mut().insert(handle.clone());

    let mut response = next.run(req).await;

    match handle.finish() {
        Some(session) if is_new && session.is_blank() => {}
        Some(session) => {
            if let Err(e) = st.sessions.save(&id, &session).await {
                warn!("Failed to save session: {}", e);
            }
            if is_new {
                let cookie = HeaderValue::from_str(&st.session_cookie.set_cookie(&id))?;
                response.headers_mut().append(SET_COOKIE, cookie);
            }
        }
        None => {
            if let Err(e) = st.sessions.remove(&id).await {
                warn!("Failed to remove session: {}", e);
            }
            let cookie = HeaderValue::from_str(&st.session_cookie.clear_cookie())?;
            response.headers_mut().append(SET_COOKIE, cookie);
        }
    }

    Ok(response)
}
