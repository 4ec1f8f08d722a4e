//! Repository for the `articles` table.

use pilcrow_core::types::DbId;
use sqlx::PgPool;

use crate::models::article::{Article, CreateArticle, UpdateArticle};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, content, created_at, owner_id, tags";

/// Provides CRUD operations for blog articles.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new article, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (title, content, owner_id, tags)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.owner_id)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find an article by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all articles, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM articles ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Article>(&query).fetch_all(pool).await
    }

    /// Apply a partial update. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists. Ownership is
    /// enforced by the handler before this is called.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                tags = COALESCE($4, tags)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(&input.tags)
            .fetch_optional(pool)
            .await
    }

    /// Delete an article. Returns `true` if a row was removed.
    ///
    /// Associated `article_images` rows are removed by `ON DELETE CASCADE`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
