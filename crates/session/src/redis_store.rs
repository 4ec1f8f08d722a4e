//! Redis-backed session store.

use async_trait::async_trait;
use pilcrow_core::types::DbId;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::{generate_token, session_key, SessionError, SessionStore, SESSION_TTL_SECS};

/// Session store backed by Redis with automatic reconnection.
///
/// Entries are written with `SET EX`, so expiry is enforced by Redis itself;
/// no sweeper runs anywhere.
#[derive(Clone)]
pub struct RedisSessionStore {
    conn: ConnectionManager,
}

impl RedisSessionStore {
    /// Connect to the Redis server.
    ///
    /// Supports both redis:// and rediss:// (TLS) URLs.
    pub async fn connect(url: &str) -> Result<Self, SessionError> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create(&self, user_id: DbId) -> Result<String, SessionError> {
        let token = generate_token();
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(session_key(&token), user_id, SESSION_TTL_SECS)
            .await?;
        tracing::debug!(user_id = %user_id, "Created session");
        Ok(token)
    }

    async fn lookup(&self, token: &str) -> Result<Option<DbId>, SessionError> {
        let mut conn = self.conn.clone();
        let user_id: Option<DbId> = conn.get(session_key(token)).await?;
        Ok(user_id)
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(session_key(token)).await?;
        tracing::debug!("Deleted session");
        Ok(())
    }
}
