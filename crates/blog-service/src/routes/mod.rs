pub mod articles;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /blogs                       create (POST), list (GET)
/// /blogs/{id}                  get, update, delete
/// /blogs/{id}/upload-image     image upload (POST)
/// ```
///
/// Static article images are served separately at `/static/articles` (see
/// the binary entrypoint); `GET /` is the health endpoint.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/blogs", articles::router())
}
