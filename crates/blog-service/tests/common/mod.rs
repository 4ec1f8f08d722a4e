//! Shared helpers for blog service integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! production, an in-memory session store, a temporary article image
//! directory, and a configurable gateway URL for enrichment. The default
//! gateway URL points at a closed port so enrichment reliably fails, which
//! exercises the placeholder path.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{HeaderName, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use pilcrow_blog_service::clients::users::UserDirectoryClient;
use pilcrow_blog_service::config::BlogServiceConfig;
use pilcrow_blog_service::routes;
use pilcrow_blog_service::state::AppState;
use pilcrow_session::MemorySessionStore;

/// Gateway URL that refuses connections immediately.
pub const UNREACHABLE_GATEWAY: &str = "http://127.0.0.1:1";

/// A fully wired test application.
pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<MemorySessionStore>,
    pub articles_dir: TempDir,
}

/// Build a test `BlogServiceConfig` writing uploads into `articles_dir`.
pub fn test_config(articles_dir: &TempDir, gateway_url: &str) -> BlogServiceConfig {
    BlogServiceConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        articles_dir: articles_dir.path().to_string_lossy().into_owned(),
        gateway_url: gateway_url.parse().expect("gateway URL should parse"),
        enrichment_timeout_secs: 3,
    }
}

/// Build the app against an unreachable gateway (enrichment always fails).
pub fn build_test_app(pool: PgPool) -> TestApp {
    build_test_app_with_gateway(pool, UNREACHABLE_GATEWAY)
}

/// Build the full application router with all middleware layers, using the
/// given database pool, an in-memory session store, and the given gateway
/// base URL for enrichment.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack that production uses.
pub fn build_test_app_with_gateway(pool: PgPool, gateway_url: &str) -> TestApp {
    let articles_dir = tempfile::tempdir().expect("tempdir should be creatable");
    let config = test_config(&articles_dir, gateway_url);
    let sessions = Arc::new(MemorySessionStore::new());

    let user_directory = UserDirectoryClient::new(
        config.gateway_url.clone(),
        Duration::from_secs(config.enrichment_timeout_secs),
    );

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::clone(&sessions) as Arc<dyn pilcrow_session::SessionStore>,
        user_directory,
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .nest_service("/static/articles", ServeDir::new(&config.articles_dir))
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
        .with_state(state);

    TestApp {
        router,
        sessions,
        articles_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request with an optional session cookie.
pub async fn get(app: Router, path: &str, token: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(token) = token {
        builder = builder.header(COOKIE, format!("session_id={token}"));
    }
    let request = builder.body(Body::empty()).expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a request with a JSON body and optional session cookie.
pub async fn send_json(
    app: Router,
    method: &str,
    path: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
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

/// Send a DELETE request with a session cookie.
pub async fn delete(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(path)
        .header(COOKIE, format!("session_id={token}"))
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a multipart upload with a single `file` field and a session cookie.
pub async fn post_file(
    app: Router,
    path: &str,
    token: &str,
    filename: &str,
    data: &[u8],
) -> Response<Body> {
    let boundary = "pilcrow-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(COOKIE, format!("session_id={token}"))
        .body(Body::from(body))
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
