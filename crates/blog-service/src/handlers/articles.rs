//! Handlers for the `/api/blogs` resource (article CRUD and image upload).

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use pilcrow_core::error::CoreError;
use pilcrow_core::naming::{article_image_filename, placeholder_author_name};
use pilcrow_core::types::{DbId, Timestamp};
use pilcrow_db::models::article::{Article, CreateArticle, UpdateArticle};
use pilcrow_db::repositories::{ArticleImageRepo, ArticleRepo};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::extract::{CurrentUser, OptionalUser};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/blogs`.
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    pub tags: Option<String>,
}

/// Request body for `PUT /api/blogs/{id}`. Absent fields keep current values.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<String>,
}

/// Public article view: the row plus its image URL, the resolved author
/// name, and whether the viewer owns it.
#[derive(Debug, Serialize)]
pub struct ArticlePublic {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub created_at: Timestamp,
    pub owner_id: DbId,
    pub tags: Option<String>,
    pub image_url: Option<String>,
    pub author_username: String,
    pub is_owner: bool,
}

/// Response body for `GET /api/blogs`.
#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub items: Vec<ArticlePublic>,
    pub total: usize,
}

/// Build the public view of an article.
///
/// The author name comes from the user service via the gateway; on any
/// enrichment failure the deterministic placeholder is substituted and the
/// read proceeds. The image is the article's earliest upload, if any.
async fn article_public(
    state: &AppState,
    article: Article,
    viewer: Option<DbId>,
) -> AppResult<ArticlePublic> {
    let image = ArticleImageRepo::find_first_for_article(&state.pool, article.id).await?;
    let image_url = image.map(|img| format!("/static/articles/{}", img.image_filename));

    let author_username = state
        .user_directory
        .author_username(article.owner_id)
        .await
        .unwrap_or_else(|| placeholder_author_name(article.owner_id));

    let is_owner = viewer == Some(article.owner_id);

    Ok(ArticlePublic {
        id: article.id,
        title: article.title,
        content: article.content,
        created_at: article.created_at,
        owner_id: article.owner_id,
        tags: article.tags,
        image_url,
        author_username,
        is_owner,
    })
}

/// Fetch an article and verify the caller owns it.
///
/// 404 when the article does not exist, 403 when it belongs to someone else.
async fn find_owned_article(
    state: &AppState,
    id: DbId,
    caller: &CurrentUser,
) -> AppResult<Article> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;

    if article.owner_id != caller.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not own this article".into(),
        )));
    }

    Ok(article)
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/blogs
///
/// Create an article owned by the caller. The owner id always comes from the
/// session, never from the body.
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(input): Json<CreateArticleRequest>,
) -> AppResult<(StatusCode, Json<ArticlePublic>)> {
    let create_dto = CreateArticle {
        title: input.title,
        content: input.content,
        owner_id: caller.user_id,
        tags: input.tags,
    };
    let article = ArticleRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(article_id = article.id, owner_id = article.owner_id, "Article created");

    let public = article_public(&state, article, Some(caller.user_id)).await?;
    Ok((StatusCode::CREATED, Json(public)))
}

/// GET /api/blogs
///
/// List all articles, newest first. Works without a session; a valid session
/// only affects the `is_owner` flag. Enrichment failures never fail the list.
pub async fn list(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
) -> AppResult<Json<ArticleListResponse>> {
    let articles = ArticleRepo::list(&state.pool).await?;

    let mut items = Vec::with_capacity(articles.len());
    for article in articles {
        items.push(article_public(&state, article, viewer).await?);
    }

    let total = items.len();
    Ok(Json(ArticleListResponse { items, total }))
}

/// GET /api/blogs/{id}
pub async fn get_article(
    State(state): State<AppState>,
    OptionalUser(viewer): OptionalUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ArticlePublic>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;

    let public = article_public(&state, article, viewer).await?;
    Ok(Json(public))
}

/// PUT /api/blogs/{id}
///
/// Partial update, owner only.
pub async fn update(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticleRequest>,
) -> AppResult<Json<ArticlePublic>> {
    find_owned_article(&state, id, &caller).await?;

    let update_dto = UpdateArticle {
        title: input.title,
        content: input.content,
        tags: input.tags,
    };
    let article = ArticleRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id,
        }))?;

    let public = article_public(&state, article, Some(caller.user_id)).await?;
    Ok(Json(public))
}

/// DELETE /api/blogs/{id}
///
/// Owner only. Image rows go with the article; files on disk are left behind.
pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    find_owned_article(&state, id, &caller).await?;

    ArticleRepo::delete(&state.pool, id).await?;
    tracing::info!(article_id = id, "Article deleted");

    Ok(Json(json!({ "message": "Article deleted" })))
}

/// POST /api/blogs/{id}/upload-image
///
/// Owner only. Accepts a multipart form with a single `file` field, writes
/// it into the articles directory as `article_{id}_{original_filename}`
/// (overwriting any previous file under the same name), and records it.
/// Article creation and image upload are deliberately independent requests;
/// an article without an image is a normal state.
pub async fn upload_image(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<DbId>,
    mut multipart: Multipart,
) -> AppResult<Json<serde_json::Value>> {
    let article = find_owned_article(&state, id, &caller).await?;

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

    let filename = article_image_filename(article.id, &original);
    let path = std::path::Path::new(&state.config.articles_dir).join(&filename);
    tokio::fs::write(&path, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store article image: {e}")))?;

    ArticleImageRepo::create(&state.pool, article.id, &filename).await?;
    tracing::info!(article_id = article.id, filename = %filename, "Article image uploaded");

    Ok(Json(json!({
        "message": "Image uploaded",
        "image_url": format!("/static/articles/{filename}"),
    })))
}
