//! Client for resolving article owners to display names.
//!
//! Calls go through the gateway's public URL (`/api/users/{id}`), not to the
//! user service directly. The client is constructed once at startup with an
//! explicit timeout; every failure mode is swallowed and reported as `None`
//! so callers can substitute a placeholder -- article reads must never fail
//! because of a slow or dead user service.

use std::time::Duration;

use pilcrow_core::types::DbId;
use reqwest::Url;

/// HTTP client for the user directory exposed through the gateway.
#[derive(Clone)]
pub struct UserDirectoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl UserDirectoryClient {
    /// Build a client for the given gateway base URL.
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { http, base_url }
    }

    /// Resolve an owner id to a username, best-effort.
    ///
    /// Returns `None` on any failure: unreachable gateway, timeout, non-200
    /// status, or a body without a string `username` field.
    pub async fn author_username(&self, owner_id: DbId) -> Option<String> {
        let url = match self.base_url.join(&format!("api/users/{owner_id}")) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(owner_id, error = %e, "Could not build enrichment URL");
                return None;
            }
        };

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(owner_id, error = %e, "Author enrichment call failed");
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!(
                owner_id,
                status = %response.status(),
                "Author enrichment returned an error status"
            );
            return None;
        }

        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(owner_id, error = %e, "Author enrichment body was not JSON");
                return None;
            }
        };

        body.get("username")
            .and_then(|v| v.as_str())
            .map(str::to_string)
    }
}
