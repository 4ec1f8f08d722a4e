use std::sync::Arc;

use pilcrow_session::SessionStore;

use crate::clients::users::UserDirectoryClient;
use crate::config::BlogServiceConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pilcrow_db::DbPool,
    /// Service configuration.
    pub config: Arc<BlogServiceConfig>,
    /// Session store; Redis in production, in-memory in tests.
    pub sessions: Arc<dyn SessionStore>,
    /// Client for author-name enrichment through the gateway.
    pub user_directory: UserDirectoryClient,
}
