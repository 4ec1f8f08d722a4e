//! Route definitions for the `/api/users` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/api/users`.
///
/// ```text
/// GET  /{id}                 -> get_user (public)
/// PUT  /me                   -> update_me
/// PUT  /me/change-password   -> change_password
/// POST /me/upload-image      -> upload_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(users::get_user))
        .route("/me", put(users::update_me))
        .route("/me/change-password", put(users::change_password))
        .route("/me/upload-image", post(users::upload_image))
}
