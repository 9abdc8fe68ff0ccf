//! HTTP server initialization and runtime setup.
//!
//! Handles the backend client, session store setup, and Axum server lifecycle.

use crate::config::Config;
use crate::domain::StoryBackend;
use crate::infrastructure::backend::HttpBackend;
use crate::infrastructure::session::{
    MemorySessionStore, RedisSessionStore, SessionCookie, SessionStore,
};
use crate::routes::app_router;
use crate::state::AppState;
use crate::web::middleware::rate_limit::RateLimit;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often the in-memory store drops expired sessions.
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Story backend client
/// - Redis session store (or in-memory fallback with a periodic purge)
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - `BACKEND_URL` is not a usable base URL
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let backend: Arc<dyn StoryBackend> =
        Arc::new(HttpBackend::new(&config.backend_url).context("Invalid BACKEND_URL")?);
    tracing::info!("Story backend: {}", config.backend_url);

    let sessions = connect_session_store(&config).await;

    let session_cookie = SessionCookie::new(
        config.session_signing_secret.clone(),
        config.session_ttl_seconds,
        config.session_cookie_secure,
    );

    let state = AppState::new(backend, sessions, session_cookie);

    let limit = RateLimit::for_deployment(config.behind_proxy);
    let app = app_router(state, limit, &config.static_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address: {}", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn connect_session_store(config: &Config) -> Arc<dyn SessionStore> {
    if let Some(redis_url) = &config.redis_url {
        match RedisSessionStore::connect(redis_url, config.session_ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Sessions stored in Redis");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Using in-memory sessions.",
                    e
                );
            }
        }
    } else {
        tracing::info!("Sessions stored in memory");
    }

    let memory = Arc::new(MemorySessionStore::new(config.session_ttl_seconds));
    memory.spawn_purge_task(SESSION_PURGE_INTERVAL);
    memory
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
