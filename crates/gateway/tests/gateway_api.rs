//! Integration tests for the gateway: auth middleware gating, identity
//! outcome mapping, header injection, and proxy routing.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_path, post_json, spawn_blog_stub, spawn_user_stub,
    NOT_JSON_TOKEN, UNREACHABLE, VALID_TOKEN,
};

// ---------------------------------------------------------------------------
// Pass-through behavior
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_requests_skip_session_validation() {
    // Only the blog stub is up; a GET must never touch the user service.
    let blog_url = spawn_blog_stub().await;
    let app = build_test_app(UNREACHABLE, &blog_url);

    let response = get_path(app, "/api/blogs").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn public_paths_skip_session_validation() {
    // No cookie, but /api/auth/login is on the allow-list: the request gets
    // past the auth middleware and fails only at the (dead) upstream.
    let app = build_test_app(UNREACHABLE, UNREACHABLE);

    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({ "email": "a@x.com", "password": "pw" }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unmatched_paths_are_not_found() {
    let app = build_test_app(UNREACHABLE, UNREACHABLE);

    let response = get_path(app, "/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Gating
// ---------------------------------------------------------------------------

#[tokio::test]
async fn mutating_request_without_cookie_is_unauthorized() {
    // Upstreams are dead, which proves the 401 comes from the gateway itself.
    let app = build_test_app(UNREACHABLE, UNREACHABLE);

    let response = post_json(app, "/api/blogs", serde_json::json!({ "title": "t" }), None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_AUTHENTICATED");
}

#[tokio::test]
async fn valid_session_injects_the_user_header() {
    let user_url = spawn_user_stub().await;
    let blog_url = spawn_blog_stub().await;
    let app = build_test_app(&user_url, &blog_url);

    let response = post_json(
        app,
        "/api/blogs",
        serde_json::json!({ "title": "t" }),
        Some(VALID_TOKEN),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["x_user_id"], "7",
        "the blog service must see the id the user service resolved"
    );
}

#[tokio::test]
async fn rejected_session_propagates_upstream_status_and_body() {
    let user_url = spawn_user_stub().await;
    let app = build_test_app(&user_url, UNREACHABLE);

    let response = post_json(
        app,
        "/api/blogs",
        serde_json::json!({ "title": "t" }),
        Some("some-expired-token"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // The body is the user service's own error payload, untouched.
    let json = body_json(response).await;
    assert_eq!(json["code"], "SESSION_EXPIRED");
}

#[tokio::test]
async fn unparseable_identity_response_is_a_bad_gateway() {
    let user_url = spawn_user_stub().await;
    let app = build_test_app(&user_url, UNREACHABLE);

    let response = post_json(
        app,
        "/api/blogs",
        serde_json::json!({ "title": "t" }),
        Some(NOT_JSON_TOKEN),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_INVALID");
}

#[tokio::test]
async fn unreachable_user_service_is_a_service_unavailable() {
    let app = build_test_app(UNREACHABLE, UNREACHABLE);

    let response = post_json(
        app,
        "/api/blogs",
        serde_json::json!({ "title": "t" }),
        Some(VALID_TOKEN),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["error"], "User service is unavailable");
}

// ---------------------------------------------------------------------------
// Proxy routing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn user_paths_are_forwarded_to_the_user_service() {
    let user_url = spawn_user_stub().await;
    let app = build_test_app(&user_url, UNREACHABLE);

    let response = get_path(app, "/api/users/7").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "grace");
}

#[tokio::test]
async fn dead_upstream_maps_to_service_unavailable_on_reads() {
    let app = build_test_app(UNREACHABLE, UNREACHABLE);

    let response = get_path(app, "/api/blogs").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Blog service is unavailable");
}
