//! User entity model and DTOs.

use pilcrow_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. The user service builds its public view from selected fields.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub profile_image_filename: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new user.
#[derive(Debug)]
pub struct CreateUser {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub bio: Option<String>,
}

/// DTO for a partial profile update. `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub bio: Option<String>,
}
