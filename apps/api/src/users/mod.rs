pub mod handlers;

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::user::{Role, UserRow};

/// Loads a user row or fails with 404.
pub async fn fetch_user(pool: &PgPool, id: Uuid) -> Result<UserRow, AppError> {
    sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}

/// Loads a user and checks the expected role, failing with 403 on mismatch.
pub async fn fetch_user_with_role(
    pool: &PgPool,
    id: Uuid,
    expected: Role,
) -> Result<UserRow, AppError> {
    let user = fetch_user(pool, id).await?;
    if user.role != expected {
        return Err(AppError::Forbidden(format!(
            "This action requires the {} role",
            expected.as_str()
        )));
    }
    Ok(user)
}
