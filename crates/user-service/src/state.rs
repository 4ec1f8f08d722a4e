use std::sync::Arc;

use pilcrow_session::SessionStore;

use crate::config::UserServiceConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pilcrow_db::DbPool,
    /// Service configuration.
    pub config: Arc<UserServiceConfig>,
    /// Session store; Redis in production, in-memory in tests.
    pub sessions: Arc<dyn SessionStore>,
}
