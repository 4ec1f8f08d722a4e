//! Opaque-token session storage shared by the pilcrow services.
//!
//! A session maps a random token to a user id with a fixed time-to-live.
//! Sessions are created on login/register, deleted on logout, and expire
//! passively in the backing store; there is no update operation and no
//! active eviction sweep.
//!
//! The capability is expressed as the [`SessionStore`] trait so services can
//! run against [`RedisSessionStore`] in production and
//! [`MemorySessionStore`] in tests. The `session_id` cookie that carries the
//! token between client and services lives in [`cookie`].

pub mod cookie;
pub mod memory;
pub mod redis_store;

use async_trait::async_trait;
use pilcrow_core::types::DbId;
use rand::distr::Alphanumeric;
use rand::Rng;

pub use memory::MemorySessionStore;
pub use redis_store::RedisSessionStore;

/// Fixed session lifetime in seconds. Also the cookie's `Max-Age`.
pub const SESSION_TTL_SECS: u64 = 3600;

/// Length of generated session tokens (alphanumeric characters).
pub const TOKEN_LENGTH: usize = 32;

/// Errors surfaced by a session store backend.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session store error: {0}")]
    Backend(#[from] redis::RedisError),
}

/// Key-value session storage with a fixed TTL.
///
/// Tokens are immutable once created: the only transitions are creation,
/// explicit deletion, and passive expiry. `lookup` does not distinguish
/// "expired" from "never existed" -- both are `None`.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a session for `user_id` and return the new opaque token.
    ///
    /// Token collisions are cryptographically negligible and not handled.
    async fn create(&self, user_id: DbId) -> Result<String, SessionError>;

    /// Resolve a token to the user id it was created for, if still live.
    async fn lookup(&self, token: &str) -> Result<Option<DbId>, SessionError>;

    /// Remove a session. Deleting an absent token is a no-op, not an error.
    async fn delete(&self, token: &str) -> Result<(), SessionError>;
}

/// Generate a cryptographically random session token.
pub(crate) fn generate_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Redis key for a session token.
pub(crate) fn session_key(token: &str) -> String {
    format!("session:{token}")
}
