//! Blog article entity model and DTOs.

use pilcrow_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Full article row from the `articles` table.
#[derive(Debug, Clone, FromRow)]
pub struct Article {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    /// Id of the owning user. Resolved to a display name at read time by
    /// calling the user service; never a hard FK across service boundaries.
    pub owner_id: DbId,
    pub tags: Option<String>,
}

/// DTO for creating a new article. The owner id comes from the caller's
/// session, never from the request body.
#[derive(Debug)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    pub owner_id: DbId,
    pub tags: Option<String>,
}

/// DTO for a partial article update. `None` fields keep their current value.
#[derive(Debug, Default)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}
