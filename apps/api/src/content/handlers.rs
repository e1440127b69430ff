use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::content::slug::slugify;
use crate::errors::AppError;
use crate::models::content::{ContentType, EducationalContentRow, TrimesterTarget};
use crate::models::user::{Role, UserRow};
use crate::state::AppState;
use crate::users::fetch_user;

#[derive(Deserialize)]
pub struct CreateContentRequest {
    pub user_id: Uuid,
    pub title: String,
    pub slug: Option<String>,
    pub summary: Option<String>,
    pub content_type: ContentType,
    pub trimester_target: Option<TrimesterTarget>,
    pub body: String,
    #[serde(default)]
    pub is_featured: bool,
}

/// POST /api/v1/content
pub async fn handle_create_content(
    State(state): State<AppState>,
    Json(req): Json<CreateContentRequest>,
) -> Result<Json<EducationalContentRow>, AppError> {
    let author = fetch_user(&state.db, req.user_id).await?;
    ensure_editor(&author)?;

    if req.title.trim().is_empty() {
        return Err(AppError::Validation("title: must not be empty".to_string()));
    }
    if req.body.trim().is_empty() {
        return Err(AppError::Validation("body: must not be empty".to_string()));
    }
    let slug = match req.slug {
        Some(s) => s.trim().to_string(),
        None => slugify(&req.title),
    };
    if slug.is_empty() {
        return Err(AppError::Validation(
            "slug: could not derive a slug from the title".to_string(),
        ));
    }

    let taken: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM educational_content WHERE slug = $1")
            .bind(&slug)
            .fetch_optional(&state.db)
            .await?;
    if taken.is_some() {
        return Err(AppError::Validation(format!(
            "slug: '{slug}' is already in use"
        )));
    }

    let content = sqlx::query_as::<_, EducationalContentRow>(
        r#"
        INSERT INTO educational_content
            (id, title, slug, summary, content_type, trimester_target, body,
             is_featured, author_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(req.title.trim())
    .bind(&slug)
    .bind(&req.summary)
    .bind(req.content_type)
    .bind(req.trimester_target.unwrap_or(TrimesterTarget::All))
    .bind(req.body.trim())
    .bind(req.is_featured)
    .bind(author.id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Published content '{}' ({})", content.slug, content.id);
    Ok(Json(content))
}

#[derive(Deserialize)]
pub struct BrowseQuery {
    pub trimester: Option<TrimesterTarget>,
    pub content_type: Option<ContentType>,
    pub featured: Option<bool>,
}

/// GET /api/v1/content
/// Active items only. An item targeting all trimesters matches any
/// trimester filter.
pub async fn handle_browse_content(
    State(state): State<AppState>,
    Query(params): Query<BrowseQuery>,
) -> Result<Json<Vec<EducationalContentRow>>, AppError> {
    let items = sqlx::query_as::<_, EducationalContentRow>(
        r#"
        SELECT * FROM educational_content
        WHERE is_active
          AND ($1::trimester_target IS NULL
               OR trimester_target = 'all'
               OR trimester_target = $1)
          AND ($2::content_type IS NULL OR content_type = $2)
          AND ($3::boolean IS NULL OR is_featured = $3)
        ORDER BY created_at DESC
        "#,
    )
    .bind(params.trimester)
    .bind(params.content_type)
    .bind(params.featured)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(items))
}

/// GET /api/v1/content/:slug
pub async fn handle_get_content(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<EducationalContentRow>, AppError> {
    let content = sqlx::query_as::<_, EducationalContentRow>(
        "SELECT * FROM educational_content WHERE slug = $1 AND is_active",
    )
    .bind(&slug)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Content '{slug}' not found")))?;
    Ok(Json(content))
}

#[derive(Deserialize)]
pub struct UpdateContentRequest {
    pub user_id: Uuid,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub body: Option<String>,
    pub content_type: Option<ContentType>,
    pub trimester_target: Option<TrimesterTarget>,
    pub is_featured: Option<bool>,
    pub is_active: Option<bool>,
}

/// PATCH /api/v1/content/:slug
/// Partial update; the slug is fixed at creation. Setting `is_active` to
/// false is the soft delete, and inactive items remain editable so they can
/// be reactivated.
pub async fn handle_update_content(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(req): Json<UpdateContentRequest>,
) -> Result<Json<EducationalContentRow>, AppError> {
    let editor = fetch_user(&state.db, req.user_id).await?;
    ensure_editor(&editor)?;

    let content = sqlx::query_as::<_, EducationalContentRow>(
        r#"
        UPDATE educational_content
        SET title = COALESCE($1, title),
            summary = COALESCE($2, summary),
            body = COALESCE($3, body),
            content_type = COALESCE($4, content_type),
            trimester_target = COALESCE($5, trimester_target),
            is_featured = COALESCE($6, is_featured),
            is_active = COALESCE($7, is_active)
        WHERE slug = $8
        RETURNING *
        "#,
    )
    .bind(&req.title)
    .bind(&req.summary)
    .bind(&req.body)
    .bind(req.content_type)
    .bind(req.trimester_target)
    .bind(req.is_featured)
    .bind(req.is_active)
    .bind(&slug)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Content '{slug}' not found")))?;

    Ok(Json(content))
}

/// Content is curated by clinicians and administrators.
fn ensure_editor(user: &UserRow) -> Result<(), AppError> {
    match user.role {
        Role::Clinician | Role::Admin => Ok(()),
        Role::Mother => Err(AppError::Forbidden(
            "Only clinicians and administrators can manage content".to_string(),
        )),
    }
}
