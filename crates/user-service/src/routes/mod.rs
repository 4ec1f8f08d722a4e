pub mod auth;
pub mod health;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                 register (public, sets cookie)
/// /auth/login                    login (public, sets cookie)
/// /auth/me                       whoami (gateway identity endpoint)
/// /auth/logout                   logout (clears cookie)
///
/// /users/{id}                    public profile lookup
/// /users/me                      profile update (session required)
/// /users/me/change-password      password change (session required)
/// /users/me/upload-image         avatar upload (session required)
/// ```
///
/// Static profile images are served separately at `/static/profiles` (see
/// the binary entrypoint); `GET /` is the health endpoint.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
}
