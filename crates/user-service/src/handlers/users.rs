//! Handlers for the `/api/users` resource (public profile, profile update,
//! password change, avatar upload).

use axum::extract::{Multipart, Path, State};
use axum::Json;
use pilcrow_core::error::CoreError;
use pilcrow_core::naming::profile_image_filename;
use pilcrow_core::types::DbId;
use pilcrow_db::models::user::{UpdateProfile, User};
use pilcrow_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::CurrentUser;
use crate::state::AppState;

/// Avatar shown for users who have not uploaded a profile image.
const DEFAULT_AVATAR_URL: &str = "https://www.w3schools.com/w3images/avatar_g.jpg";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Public user view returned by every user-facing endpoint. Never contains
/// the password hash.
#[derive(Debug, Serialize)]
pub struct UserPublic {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub bio: Option<String>,
    pub profile_image_url: String,
}

/// Request body for `PUT /api/users/me`. Absent fields keep current values.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    pub bio: Option<String>,
}

/// Request body for `PUT /api/users/me/change-password`.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// Build the public view of a user row.
pub fn user_public(user: &User) -> UserPublic {
    let profile_image_url = match &user.profile_image_filename {
        Some(filename) => format!("/static/profiles/{filename}"),
        None => DEFAULT_AVATAR_URL.to_string(),
    };
    UserPublic {
        id: user.id,
        email: user.email.clone(),
        username: user.username.clone(),
        bio: user.bio.clone(),
        profile_image_url,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/users/{id}
///
/// Public profile lookup. This is the endpoint the blog service calls (via
/// the gateway) to resolve an owner id to a display name.
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserPublic>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id,
        }))?;
    Ok(Json(user_public(&user)))
}

/// PUT /api/users/me
///
/// Partial update of the caller's username and bio.
pub async fn update_me(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserPublic>> {
    let update = UpdateProfile {
        username: input.username,
        bio: input.bio,
    };
    let user = UserRepo::update_profile(&state.pool, caller.user_id, &update)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: caller.user_id,
        }))?;
    Ok(Json(user_public(&user)))
}

/// PUT /api/users/me/change-password
///
/// Requires the correct current password before accepting the new one.
pub async fn change_password(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_id(&state.pool, caller.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: caller.user_id,
        }))?;

    let current_valid = verify_password(&input.current_password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !current_valid {
        return Err(AppError::Core(CoreError::Validation(
            "Current password does not match".into(),
        )));
    }

    validate_password_strength(&input.new_password)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    let hashed = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    UserRepo::update_password(&state.pool, user.id, &hashed).await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(Json(json!({ "message": "Password changed" })))
}

/// POST /api/users/me/upload-image
///
/// Accepts a multipart form with a single `file` field, writes it into the
/// profiles directory as `user_{id}_{original_filename}` (overwriting any
/// previous upload under the same name), and records the filename.
pub async fn upload_image(
    State(state): State<AppState>,
    caller: CurrentUser,
    mut multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let user = UserRepo::find_by_id(&state.pool, caller.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: caller.user_id,
        }))?;

    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("upload").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((filename, data.to_vec()));
        }
    }

    let (original, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let filename = profile_image_filename(user.id, &original);
    let path = std::path::Path::new(&state.config.profiles_dir).join(&filename);
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store profile image: {e}")))?;

    UserRepo::set_profile_image(&state.pool, user.id, &filename).await?;
    tracing::info!(user_id = user.id, filename = %filename, "Profile image uploaded");

    Ok(Json(json!({
        "message": "Profile image uploaded",
        "profile_image_url": format!("/static/profiles/{filename}"),
    })))
}
