//! Shared helpers for gateway integration tests.
//!
//! Builds the gateway router with the production middleware stack against
//! configurable upstream URLs, plus in-process stub services standing in
//! for the user and blog services.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderMap, HeaderName, Request, Response, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use pilcrow_gateway::config::GatewayConfig;
use pilcrow_gateway::identity::IdentityClient;
use pilcrow_gateway::middleware::auth::require_session;
use pilcrow_gateway::proxy::{self, ServiceClient};
use pilcrow_gateway::state::GatewayState;

/// Upstream URL that refuses connections immediately.
pub const UNREACHABLE: &str = "http://127.0.0.1:1";

/// Session token the stub user service accepts (resolves to user id 7).
pub const VALID_TOKEN: &str = "valid-token";

/// Session token for which the stub answers 200 with a non-JSON body.
pub const NOT_JSON_TOKEN: &str = "not-json";

/// Build a test `GatewayConfig` pointing at the given upstream URLs.
pub fn test_config(user_url: &str, blog_url: &str) -> GatewayConfig {
    GatewayConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        user_service_url: user_url.parse().expect("user URL should parse"),
        blog_service_url: blog_url.parse().expect("blog URL should parse"),
        auth_timeout_secs: 5,
        proxy_timeout_secs: 5,
    }
}

/// Build the gateway router with all middleware layers.
///
/// This mirrors the router construction in `main.rs` (minus CORS, which is
/// origin-configuration only) so tests exercise the same auth middleware
/// and proxy fallback that production uses.
pub fn build_test_app(user_url: &str, blog_url: &str) -> Router {
    let config = test_config(user_url, blog_url);

    let identity = IdentityClient::new(
        &config.user_service_url,
        Duration::from_secs(config.auth_timeout_secs),
    );
    let proxy_client = ServiceClient::new(Duration::from_secs(config.proxy_timeout_secs));

    let state = GatewayState {
        config: Arc::new(config),
        identity,
        proxy: proxy_client,
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .route("/", get(|| async { Json(json!({ "status": "ok" })) }))
        .fallback(proxy::proxy)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Stub upstreams
// ---------------------------------------------------------------------------

/// Stub identity endpoint mirroring the user service's contract.
async fn stub_me(headers: HeaderMap) -> axum::response::Response {
    let cookie = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if cookie.contains(&format!("session_id={VALID_TOKEN}")) {
        Json(json!({ "id": 7, "email": "g@x.com", "username": "grace" })).into_response()
    } else if cookie.contains(&format!("session_id={NOT_JSON_TOKEN}")) {
        (StatusCode::OK, "definitely not json").into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Session expired. Please log in again.",
                "code": "SESSION_EXPIRED",
            })),
        )
            .into_response()
    }
}

/// Spawn a stub user service; returns its base URL.
pub async fn spawn_user_stub() -> String {
    let app = Router::new()
        .route("/api/auth/me", get(stub_me))
        .route(
            "/api/users/{id}",
            get(|| async { Json(json!({ "username": "grace" })) }),
        );
    spawn(app).await
}

/// Spawn a stub blog service that echoes the `X-User-Id` header it receives;
/// returns its base URL.
pub async fn spawn_blog_stub() -> String {
    let app = Router::new().route(
        "/api/blogs",
        post(|headers: HeaderMap| async move {
            let forwarded = headers
                .get("x-user-id")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            Json(json!({ "x_user_id": forwarded }))
        })
        .get(|| async { Json(json!({ "items": [], "total": 0 })) }),
    );
    spawn(app).await
}

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("stub should bind");
    let addr = listener.local_addr().expect("stub should have an address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("stub should serve");
    });
    format!("http://{addr}")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get_path(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a POST request with a JSON body and optional session cookie.
pub async fn post_json(
    app: Router,
    path: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("session_id={token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}
