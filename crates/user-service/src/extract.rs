//! Session-based authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pilcrow_core::error::CoreError;
use pilcrow_core::types::DbId;
use pilcrow_session::cookie::extract_session_token;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller resolved from the `session_id` cookie via the
/// session store.
///
/// Use this as an extractor parameter in any handler that requires a live
/// session:
///
/// ```ignore
/// async fn my_handler(user: CurrentUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// Rejections: 401 `NOT_AUTHENTICATED` when no cookie is present, 401
/// `SESSION_EXPIRED` when the token is not in the store. The service resolves
/// sessions itself and ignores the gateway's `X-User-Id` header.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The caller's internal database id.
    pub user_id: DbId,
    /// The session token the caller presented.
    pub token: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_session_token(&parts.headers)
            .ok_or(AppError::Core(CoreError::NotAuthenticated))?;

        let user_id = state
            .sessions
            .lookup(&token)
            .await?
            .ok_or(AppError::Core(CoreError::SessionExpired))?;

        Ok(CurrentUser { user_id, token })
    }
}
