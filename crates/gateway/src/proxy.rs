//! Request forwarding to the upstream services.
//!
//! The gateway routes by path prefix and forwards the request otherwise
//! untouched: method, path, query, headers (minus `Host`), and body all pass
//! through, and the upstream response comes back as-is. A single attempt
//! with a fixed timeout; nothing is retried.

use std::time::Duration;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::Response;
use reqwest::Url;

use crate::response::json_error;
use crate::state::GatewayState;

/// The services the gateway can forward to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    UserService,
    BlogService,
}

impl Upstream {
    /// Human-readable name used in error messages and logs.
    pub fn name(self) -> &'static str {
        match self {
            Upstream::UserService => "User service",
            Upstream::BlogService => "Blog service",
        }
    }
}

/// Resolve a request path to its upstream service.
///
/// The route table is fixed: auth, user, and profile-image paths go to the
/// user service; blog and article-image paths go to the blog service.
pub fn resolve_upstream(path: &str) -> Option<Upstream> {
    if path.starts_with("/api/auth") || path.starts_with("/api/users") {
        return Some(Upstream::UserService);
    }
    if path.starts_with("/static/profiles") {
        return Some(Upstream::UserService);
    }
    if path.starts_with("/api/blogs") || path.starts_with("/static/articles") {
        return Some(Upstream::BlogService);
    }
    None
}

/// HTTP client for forwarding requests to the upstream services.
#[derive(Clone)]
pub struct ServiceClient {
    client: reqwest::Client,
}

impl ServiceClient {
    pub fn new(timeout: Duration) -> Self {
        // Connection pooling and keep-alive matter here: every request that
        // enters the system flows through this client.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Forward an HTTP request to a service, returning its response or a
    /// 503 when the service cannot be reached.
    pub async fn forward(
        &self,
        service_url: &Url,
        upstream: Upstream,
        request: Request<Body>,
    ) -> Response {
        // Build target URL from the upstream base plus the original
        // path and query.
        let path = request.uri().path();
        let target = {
            let mut url = service_url.clone();
            url.set_path(path);
            url.set_query(request.uri().query());
            url
        };

        let method = request.method().clone();
        let headers = request.headers().clone();

        // Read the body; requests through the gateway are small (JSON or a
        // single image upload).
        let (_parts, body) = request.into_parts();
        let body_bytes = match axum::body::to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read request body");
                return json_error(StatusCode::BAD_REQUEST, "BAD_REQUEST", "Unreadable body");
            }
        };

        let mut outgoing = self.client.request(method, target);

        // Copy headers (except Host, which reqwest sets for the target).
        for (key, value) in headers.iter() {
            if key != "host" {
                outgoing = outgoing.header(key, value);
            }
        }

        if !body_bytes.is_empty() {
            outgoing = outgoing.body(body_bytes.to_vec());
        }

        match outgoing.send().await {
            Ok(upstream_response) => {
                let status = upstream_response.status();
                let mut builder = Response::builder().status(status);

                for (key, value) in upstream_response.headers().iter() {
                    builder = builder.header(key, value);
                }

                let body = match upstream_response.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        tracing::error!(
                            service = upstream.name(),
                            error = %e,
                            "Failed to read upstream response body"
                        );
                        return json_error(
                            StatusCode::SERVICE_UNAVAILABLE,
                            "UPSTREAM_UNAVAILABLE",
                            &format!("{} is unavailable", upstream.name()),
                        );
                    }
                };

                builder
                    .body(Body::from(body))
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "Failed to build proxied response");
                        json_error(
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "INTERNAL_ERROR",
                            "An internal error occurred",
                        )
                    })
            }
            Err(e) => {
                tracing::error!(
                    service = upstream.name(),
                    service_url = %service_url,
                    error = %e,
                    "Forwarding to upstream failed"
                );
                json_error(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "UPSTREAM_UNAVAILABLE",
                    &format!("{} is unavailable", upstream.name()),
                )
            }
        }
    }
}

/// Fallback handler: route by path prefix and forward.
pub async fn proxy(State(state): State<GatewayState>, request: Request<Body>) -> Response {
    match resolve_upstream(request.uri().path()) {
        Some(upstream) => {
            let base = state.upstream_url(upstream).clone();
            state.proxy.forward(&base, upstream, request).await
        }
        None => json_error(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "No route for this path",
        ),
    }
}
