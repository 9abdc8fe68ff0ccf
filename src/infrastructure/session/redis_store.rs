//! Redis-backed session store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

use super::service::{SessionError, SessionResult, SessionStore};
use crate::domain::VisitorSession;

/// Stores sessions as JSON strings under `session:<id>` with `SET EX`.
///
/// Uses `ConnectionManager` for connection reuse and reconnects.
pub struct RedisSessionStore {
    client: ConnectionManager,
    ttl_seconds: u64,
    key_prefix: String,
}

impl RedisSessionStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionError`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> SessionResult<Self> {
        info!("Connecting to Redis session store");

        let client = Client::open(redis_url).map_err(|e| {
            SessionError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            SessionError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| SessionError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            ttl_seconds,
            key_prefix: "session:".to_string(),
        })
    }

    fn build_key(&self, id: &str) -> String {
        format!("{}{}", self.key_prefix, id)
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn load(&self, id: &str) -> SessionResult<Option<VisitorSession>> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        let raw = conn.get::<_, Option<String>>(&key).await.map_err(|e| {
            warn!("Redis GET error for session: {}", e);
            SessionError::OperationError(e.to_string())
        })?;

        match raw {
            Some(json) => serde_json::from_str(&json)
                .map(Some)
                .map_err(|e| SessionError::SerializationError(e.to_string())),
            None => {
                debug!("Session MISS");
                Ok(None)
            }
        }
    }

    async fn save(&self, id: &str, session: &VisitorSession) -> SessionResult<()> {
        let key = self.build_key(id);
        let json = serde_json::to_string(session)
            .map_err(|e| SessionError::SerializationError(e.to_string()))?;
        let mut conn = self.client.clone();

        conn.set_ex::<_, _, ()>(&key, json, self.ttl_seconds)
            .await
            .map_err(|e| {
                warn!("Redis SET error for session: {}", e);
                SessionError::OperationError(e.to_string())
            })
    }

    async fn remove(&self, id: &str) -> SessionResult<()> {
        let key = self.build_key(id);
        let mut conn = self.client.clone();

        conn.del::<_, i32>(&key)
            .await
            .map(|_| ())
            .map_err(|e| SessionError::OperationError(e.to_string()))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn kind(&self) -> &'static str {
        "redis"
    }
}
