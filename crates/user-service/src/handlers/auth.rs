//! Handlers for the `/api/auth` resource (register, login, whoami, logout).

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pilcrow_core::error::CoreError;
use pilcrow_db::models::user::CreateUser;
use pilcrow_db::repositories::UserRepo;
use pilcrow_session::cookie::{
    clear_session_cookie, extract_session_token, set_session_cookie,
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::users::user_public;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub password: String,
    pub username: String,
    pub bio: Option<String>,
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account. Fails with 409 if the email is already in use;
/// otherwise hashes the password, persists the user, creates a session, and
/// sets the session cookie (auto-login). Returns 201 with the public view.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<Response> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))?;
    validate_password_strength(&input.password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    // Pre-check for a friendlier message; the uq_users_email constraint
    // still backstops concurrent registrations.
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already in use".into(),
        )));
    }

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create_dto = CreateUser {
        email: input.email,
        username: input.username,
        password_hash: hashed,
        bio: input.bio,
    };
    let user = UserRepo::create(&state.pool, &create_dto).await?;

    let token = state.sessions.create(user.id).await?;
    tracing::info!(user_id = user.id, "Registered new user");

    let mut response =
        (StatusCode::CREATED, Json(user_public(&user))).into_response();
    set_session_cookie(response.headers_mut(), &token);
    Ok(response)
}

/// POST /api/auth/login
///
/// Authenticate with email + password. On success creates a session and sets
/// the session cookie, exactly like register.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or(AppError::Core(CoreError::InvalidCredentials))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::InvalidCredentials));
    }

    let token = state.sessions.create(user.id).await?;
    tracing::info!(user_id = user.id, "User logged in");

    let mut response = Json(user_public(&user)).into_response();
    set_session_cookie(response.headers_mut(), &token);
    Ok(response)
}

/// GET /api/auth/me
///
/// Resolve the caller's session to their public view. This is also the
/// identity endpoint the gateway calls for every mutating request.
///
/// 401 without a cookie; 401 *and* a cleared cookie when the token is no
/// longer in the store; 404 when the user row has since disappeared.
pub async fn me(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    let token =
        extract_session_token(&headers).ok_or(AppError::Core(CoreError::NotAuthenticated))?;

    let Some(user_id) = state.sessions.lookup(&token).await? else {
        // Expired or revoked: reject and drop the stale cookie.
        let mut response = AppError::Core(CoreError::SessionExpired).into_response();
        clear_session_cookie(response.headers_mut());
        return Ok(response);
    };

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))?;

    Ok(Json(user_public(&user)).into_response())
}

/// POST /api/auth/logout
///
/// Delete the caller's session if a cookie was presented (idempotent no-op
/// otherwise), clear the cookie either way, and always report success.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    if let Some(token) = extract_session_token(&headers) {
        state.sessions.delete(&token).await?;
    }

    let mut response = Json(json!({ "message": "Logged out" })).into_response();
    clear_session_cookie(response.headers_mut());
    Ok(response)
}
