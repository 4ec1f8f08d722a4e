//! Session-validating middleware.
//!
//! Gates every request that is not `GET`/`OPTIONS` and not on the public
//! allow-list. A gated request must carry a `session_id` cookie, which is
//! resolved through the user service's identity endpoint; on success the
//! resolved user id is injected as `X-User-Id` before forwarding.
//!
//! This is the trust boundary: services may rely on `X-User-Id` only
//! because the gateway always overwrites it and is the single public entry
//! point. (The current services resolve sessions themselves and leave the
//! header unused.)

use axum::extract::{Request, State};
use axum::http::{HeaderName, HeaderValue, Method, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use pilcrow_session::cookie::extract_session_token;

use crate::identity::IdentityOutcome;
use crate::response::json_error;
use crate::state::GatewayState;

/// Header carrying the resolved user id to downstream services.
pub const HEADER_USER_ID: &str = "x-user-id";

/// Session validation middleware; see the module docs for the algorithm.
pub async fn require_session(
    State(state): State<GatewayState>,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method();
    let path = request.uri().path().to_string();

    // Reads and public endpoints pass through unchanged.
    if method == Method::GET || method == Method::OPTIONS || is_public_path(&path) {
        return next.run(request).await;
    }

    let Some(token) = extract_session_token(request.headers()) else {
        tracing::debug!(path = %path, "Missing session cookie on gated request");
        return json_error(
            StatusCode::UNAUTHORIZED,
            "NOT_AUTHENTICATED",
            "Not authenticated",
        );
    };

    match state.identity.whoami(&token).await {
        IdentityOutcome::Authenticated(user_id) => {
            // Always overwrite: a spoofed X-User-Id from the client must
            // never reach a service.
            if let Ok(value) = HeaderValue::from_str(&user_id.to_string()) {
                request
                    .headers_mut()
                    .insert(HeaderName::from_static(HEADER_USER_ID), value);
            }
            tracing::debug!(user_id, path = %path, "Session verified, user header injected");
            next.run(request).await
        }
        IdentityOutcome::Rejected { status, body } => {
            // The user service already produced the right status and body
            // (401 expired, 404 vanished user, ...); hand them through.
            Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(axum::body::Body::from(body))
                .unwrap_or_else(|_| {
                    json_error(
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_INVALID",
                        "Invalid auth response",
                    )
                })
        }
        IdentityOutcome::Invalid => json_error(
            StatusCode::BAD_GATEWAY,
            "UPSTREAM_INVALID",
            "Invalid auth response",
        ),
        IdentityOutcome::Unavailable => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "UPSTREAM_UNAVAILABLE",
            "User service is unavailable",
        ),
    }
}

/// Check if a path is public (doesn't require authentication).
fn is_public_path(path: &str) -> bool {
    matches!(path, "/api/auth/login" | "/api/auth/register")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_and_register_are_public() {
        assert!(is_public_path("/api/auth/login"));
        assert!(is_public_path("/api/auth/register"));
    }

    #[test]
    fn everything_else_is_gated() {
        assert!(!is_public_path("/api/auth/logout"));
        assert!(!is_public_path("/api/auth/me"));
        assert!(!is_public_path("/api/blogs"));
        assert!(!is_public_path("/api/users/me"));
    }
}
