//! In-memory session store for tests.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use pilcrow_core::types::DbId;
use tokio::sync::Mutex;

use crate::{generate_token, SessionError, SessionStore, SESSION_TTL_SECS};

/// Mutex-guarded map honoring the same TTL semantics as the Redis store.
///
/// Expired entries are dropped lazily on lookup; there is no sweeper, same
/// as production.
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, (DbId, Instant)>>,
    ttl: Duration,
}

impl MemorySessionStore {
    /// Store with the production TTL.
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(SESSION_TTL_SECS))
    }

    /// Store with a custom TTL, for expiry tests.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, user_id: DbId) -> Result<String, SessionError> {
        let token = generate_token();
        let expires_at = Instant::now() + self.ttl;
        self.entries
            .lock()
            .await
            .insert(token.clone(), (user_id, expires_at));
        Ok(token)
    }

    async fn lookup(&self, token: &str) -> Result<Option<DbId>, SessionError> {
        let mut entries = self.entries.lock().await;
        match entries.get(token) {
            Some(&(user_id, expires_at)) if expires_at > Instant::now() => Ok(Some(user_id)),
            Some(_) => {
                entries.remove(token);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, token: &str) -> Result<(), SessionError> {
        self.entries.lock().await.remove(token);
        Ok(())
    }
}
