//! Article image entity model.

use pilcrow_core::types::DbId;
use sqlx::FromRow;

/// Row from the `article_images` table.
///
/// An article may accumulate several rows over repeated uploads; reads use
/// the lowest-id row as "the" image.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleImage {
    pub id: DbId,
    pub image_filename: String,
    pub article_id: DbId,
}
