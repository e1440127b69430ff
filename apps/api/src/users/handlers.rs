use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, UserRow};
use crate::state::AppState;
use crate::users::fetch_user;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
}

/// POST /api/v1/users
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<UserRow>, AppError> {
    let email = req.email.trim().to_lowercase();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation(
            "email: must be a valid address".to_string(),
        ));
    }
    if req.full_name.trim().is_empty() {
        return Err(AppError::Validation(
            "full_name: must not be empty".to_string(),
        ));
    }

    let exists: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    if exists.is_some() {
        return Err(AppError::Validation(
            "email: already registered".to_string(),
        ));
    }

    let user = sqlx::query_as::<_, UserRow>(
        r#"
        INSERT INTO users
            (id, email, full_name, role, phone, emergency_contact_name, emergency_contact_phone)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(req.full_name.trim())
    .bind(req.role)
    .bind(&req.phone)
    .bind(&req.emergency_contact_name)
    .bind(&req.emergency_contact_phone)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Registered {} account {}", user.role.as_str(), user.id);
    Ok(Json(user))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserRow>, AppError> {
    Ok(Json(fetch_user(&state.db, id).await?))
}

#[derive(Deserialize)]
pub struct RoleQuery {
    pub role: Role,
}

/// GET /api/v1/users?role=
/// Roster lookup: clinicians list their patients, mothers pick a clinician.
pub async fn handle_list_by_role(
    State(state): State<AppState>,
    Query(params): Query<RoleQuery>,
) -> Result<Json<Vec<UserRow>>, AppError> {
    let users =
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE role = $1 ORDER BY full_name ASC")
            .bind(params.role)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(users))
}
