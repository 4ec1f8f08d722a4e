//! Route definitions for the `/api/blogs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/api/blogs`.
///
/// ```text
/// POST   /                   -> create (session required)
/// GET    /                   -> list (session optional)
/// GET    /{id}               -> get_article (session optional)
/// PUT    /{id}               -> update (owner only)
/// DELETE /{id}               -> delete (owner only)
/// POST   /{id}/upload-image  -> upload_image (owner only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(articles::create).get(articles::list))
        .route(
            "/{id}",
            get(articles::get_article)
                .put(articles::update)
                .delete(articles::delete),
        )
        .route("/{id}/upload-image", post(articles::upload_image))
}
