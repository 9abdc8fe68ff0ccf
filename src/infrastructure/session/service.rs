//! Session store trait and error types.

use async_trait::async_trait;
use std::fmt;

use crate::domain::VisitorSession;

/// Errors that can occur during session store operations.
#[derive(Debug)]
pub enum SessionError {
    ConnectionError(String),
    OperationError(String),
    SerializationError(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::ConnectionError(e) => write!(f, "Session store connection error: {}", e),
            Self::OperationError(e) => write!(f, "Session store operation error: {}", e),
            Self::SerializationError(e) => write!(f, "Session serialization error: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

/// Result type for session store operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Storage for per-visitor page state, keyed by session id.
///
/// Entries expire after the store's TTL; saving an entry refreshes it.
/// Callers treat errors as "no session" and keep serving the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::session::MemorySessionStore`] - in-process map, single instance
/// - [`crate::infrastructure::session::RedisSessionStore`] - shared Redis storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads a session.
    ///
    /// Returns `Ok(None)` for unknown or expired ids.
    async fn load(&self, id: &str) -> SessionResult<Option<VisitorSession>>;

    /// Stores a session and restarts its TTL.
    async fn save(&self, id: &str, session: &VisitorSession) -> SessionResult<()>;

    /// Deletes a session. Unknown ids are not an error.
    async fn remove(&self, id: &str) -> SessionResult<()>;

    /// Checks if the storage backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short label for health reports, e.g. `"memory"` or `"redis"`.
    fn kind(&self) -> &'static str;
}
