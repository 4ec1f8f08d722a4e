//! Session-based authentication extractors for Axum handlers.
//!
//! The blog service resolves sessions directly against the session store
//! from the `session_id` cookie, with the same 401 shapes the user service
//! produces. The gateway's `X-User-Id` header is ignored.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use pilcrow_core::error::CoreError;
use pilcrow_core::types::DbId;
use pilcrow_session::cookie::extract_session_token;

use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller, required on every mutating article endpoint.
///
/// Rejections: 401 `NOT_AUTHENTICATED` when no cookie is present, 401
/// `SESSION_EXPIRED` when the token is not in the store.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The caller's internal database id.
    pub user_id: DbId,
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

        Ok(CurrentUser { user_id })
    }
}

/// Possibly-authenticated viewer, used by article reads to resolve
/// `is_owner`.
///
/// Never rejects: a missing cookie or a token that is no longer in the
/// store both resolve to an anonymous viewer.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<DbId>);

impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = extract_session_token(&parts.headers) else {
            return Ok(OptionalUser(None));
        };
        let user_id = state.sessions.lookup(&token).await?;
        Ok(OptionalUser(user_id))
    }
}
