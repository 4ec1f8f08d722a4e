//! Shared helpers for user service integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! production, but with an in-memory session store and a temporary profile
//! image directory.

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

use pilcrow_session::MemorySessionStore;
use pilcrow_user_service::config::UserServiceConfig;
use pilcrow_user_service::routes;
use pilcrow_user_service::state::AppState;

/// A fully wired test application.
///
/// Holds the session store (for seeding sessions directly) and the temp
/// directory backing profile image uploads; dropping the struct cleans the
/// directory up.
pub struct TestApp {
    pub router: Router,
    pub sessions: Arc<MemorySessionStore>,
    pub profiles_dir: TempDir,
}

/// Build a test `UserServiceConfig` writing uploads into `profiles_dir`.
pub fn test_config(profiles_dir: &TempDir) -> UserServiceConfig {
    UserServiceConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        profiles_dir: profiles_dir.path().to_string_lossy().into_owned(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and an in-memory session store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (request ID, timeout, tracing, panic
/// recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> TestApp {
    let profiles_dir = tempfile::tempdir().expect("tempdir should be creatable");
    let config = test_config(&profiles_dir);
    let sessions = Arc::new(MemorySessionStore::new());

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        sessions: Arc::clone(&sessions) as Arc<dyn pilcrow_session::SessionStore>,
    };

    let request_id_header = HeaderName::from_static("x-request-id");

    let router = Router::new()
        .merge(routes::health::router())
        .nest("/api", routes::api_routes())
        .nest_service("/static/profiles", ServeDir::new(&config.profiles_dir))
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
        profiles_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, path: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a GET request carrying a session cookie.
pub async fn get_with_cookie(app: Router, path: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(path)
        .header(COOKIE, format!("session_id={token}"))
        .body(Body::empty())
        .expect("request should build");
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

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, path: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", path, body, None).await
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

/// Extract the session token from a response's `Set-Cookie` header.
///
/// Returns `None` when no cookie was set or when the cookie was cleared.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    let value = response.headers().get("set-cookie")?.to_str().ok()?;
    let token = value
        .split(';')
        .next()?
        .trim()
        .strip_prefix("session_id=")?;
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

/// True when the response instructs the client to drop the session cookie.
pub fn clears_session_cookie(response: &Response<Body>) -> bool {
    response
        .headers()
        .get("set-cookie")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("session_id=;") && v.contains("Max-Age=0"))
}
