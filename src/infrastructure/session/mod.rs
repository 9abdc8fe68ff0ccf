//! Visitor session storage.
//!
//! Provides a [`SessionStore`] trait with two implementations:
//! - [`RedisSessionStore`] - Shared Redis-backed storage
//! - [`MemorySessionStore`] - In-process fallback
//!
//! and [`SessionCookie`], the signed cookie that names a visitor's session.

mod cookie;
mod memory_store;
mod redis_store;
mod service;

pub use cookie::{SESSION_COOKIE, SessionCookie};
pub use memory_store::MemorySessionStore;
pub use redis_store::RedisSessionStore;
pub use service::{SessionError, SessionResult, SessionStore};
