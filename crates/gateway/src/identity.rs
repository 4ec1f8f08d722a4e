//! Identity resolution against the user service.
//!
//! For every gated request the middleware makes one synchronous call to
//! `GET {user_service}/api/auth/me`, forwarding the caller's session cookie.
//! A single attempt with a fixed timeout; nothing is retried.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::header::COOKIE;
use pilcrow_session::cookie::SESSION_COOKIE_NAME;
use reqwest::{StatusCode, Url};

/// Outcome of one identity call.
#[derive(Debug)]
pub enum IdentityOutcome {
    /// The user service resolved the session; carries the numeric user id.
    Authenticated(i64),
    /// The user service rejected the session (any non-200). Its status and
    /// body are propagated to the caller verbatim.
    Rejected { status: StatusCode, body: Bytes },
    /// The user service answered 200 but the body had no numeric `id`.
    Invalid,
    /// The user service could not be reached (refused, timeout).
    Unavailable,
}

/// Client for the user service's identity endpoint.
#[derive(Clone)]
pub struct IdentityClient {
    http: reqwest::Client,
    whoami_url: Url,
}

impl IdentityClient {
    /// Build a client for the given user service base URL.
    pub fn new(user_service_url: &Url, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        let whoami_url = user_service_url
            .join("api/auth/me")
            .expect("user service URL must accept a path");
        Self { http, whoami_url }
    }

    /// Resolve a session token to a user id via the user service.
    pub async fn whoami(&self, token: &str) -> IdentityOutcome {
        let response = match self
            .http
            .get(self.whoami_url.clone())
            .header(COOKIE, format!("{SESSION_COOKIE_NAME}={token}"))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Identity call to user service failed");
                return IdentityOutcome::Unavailable;
            }
        };

        let status = response.status();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(error = %e, "Identity response body could not be read");
                return IdentityOutcome::Unavailable;
            }
        };

        if status != StatusCode::OK {
            return IdentityOutcome::Rejected { status, body };
        }

        let user_id = serde_json::from_slice::<serde_json::Value>(&body)
            .ok()
            .and_then(|json| json.get("id")?.as_i64());

        match user_id {
            Some(id) => IdentityOutcome::Authenticated(id),
            None => {
                tracing::warn!("Identity response had no numeric id field");
                IdentityOutcome::Invalid
            }
        }
    }
}
