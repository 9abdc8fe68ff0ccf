//! In-process session store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use super::service::{SessionResult, SessionStore};
use crate::domain::VisitorSession;

struct Entry {
    session: VisitorSession,
    expires_at: DateTime<Utc>,
}

/// A session store backed by a `HashMap` behind an async `RwLock`.
///
/// Used when Redis is not configured or unreachable. Sessions are lost on
/// restart and are not shared between instances.
///
/// Expired entries are never returned; they are removed on lookup and by
/// [`MemorySessionStore::spawn_purge_task`].
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, Entry>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Creates an empty store whose entries live for `ttl_seconds`.
    pub fn new(ttl_seconds: u64) -> Self {
        debug!("Using in-memory session store");
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::seconds(i64::try_from(ttl_seconds).unwrap_or(i64::MAX / 1000)),
        }
    }

    /// Number of live entries.
    pub async fn len(&self) -> usize {
        let now = Utc::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();

        entries.retain(|_, entry| entry.expires_at > now);

        before - entries.len()
    }

    /// Purges expired entries every `every` until the store is dropped
    /// everywhere else.
    pub fn spawn_purge_task(self: &Arc<Self>, every: std::time::Duration) -> JoinHandle<()> {
        let store = Arc::downgrade(self);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let purged = store.purge_expired().await;
                if purged > 0 {
                    debug!("Purged {} expired sessions", purged);
                }
            }
        })
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: &str) -> SessionResult<Option<VisitorSession>> {
        let now = Utc::now();

        {
            let entries = self.entries.read().await;
            match entries.get(id) {
                Some(entry) if entry.expires_at > now => return Ok(Some(entry.session.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // Expired: drop it
        self.entries.write().await.remove(id);
        Ok(None)
    }

    async fn save(&self, id: &str, session: &VisitorSession) -> SessionResult<()> {
        let now = Utc::now();
        self.entries.write().await.insert(
            id.to_string(),
            Entry {
                session: session.clone(),
                expires_at: now + self.ttl,
            },
        );

        Ok(())
    }

    async fn remove(&self, id: &str) -> SessionResult<()> {
        self.entries.write().await.remove(id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}
