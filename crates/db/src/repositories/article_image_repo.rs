//! Repository for the `article_images` table.

use pilcrow_core::types::DbId;
use sqlx::PgPool;

use crate::models::article_image::ArticleImage;

const COLUMNS: &str = "id, image_filename, article_id";

/// Provides operations for article image records.
pub struct ArticleImageRepo;

impl ArticleImageRepo {
    /// Record an uploaded image for an article.
    pub async fn create(
        pool: &PgPool,
        article_id: DbId,
        image_filename: &str,
    ) -> Result<ArticleImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO article_images (image_filename, article_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleImage>(&query)
            .bind(image_filename)
            .bind(article_id)
            .fetch_one(pool)
            .await
    }

    /// The image shown for an article: the earliest uploaded row, if any.
    pub async fn find_first_for_article(
        pool: &PgPool,
        article_id: DbId,
    ) -> Result<Option<ArticleImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM article_images WHERE article_id = $1 ORDER BY id LIMIT 1"
        );
        sqlx::query_as::<_, ArticleImage>(&query)
            .bind(article_id)
            .fetch_optional(pool)
            .await
    }
}
