use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::messaging::threads::{group_conversations, ConversationSummary};
use crate::models::message::MessageRow;
use crate::state::AppState;
use crate::users::fetch_user;

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub user_id: Uuid,
    pub receiver_id: Uuid,
    pub subject: Option<String>,
    pub content: String,
    #[serde(default)]
    pub is_urgent: bool,
    pub parent_id: Option<Uuid>,
}

/// POST /api/v1/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<MessageRow>, AppError> {
    let sender = fetch_user(&state.db, req.user_id).await?;
    if req.receiver_id == sender.id {
        return Err(AppError::Validation(
            "receiver_id: cannot message yourself".to_string(),
        ));
    }
    let receiver = fetch_user(&state.db, req.receiver_id).await?;
    if req.content.trim().is_empty() {
        return Err(AppError::Validation(
            "content: must not be empty".to_string(),
        ));
    }

    // A reply must extend a thread between the same two people.
    if let Some(parent_id) = req.parent_id {
        let parent = sqlx::query_as::<_, MessageRow>("SELECT * FROM messages WHERE id = $1")
            .bind(parent_id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {parent_id} not found")))?;
        let pair = [parent.sender_id, parent.receiver_id];
        if !pair.contains(&sender.id) || !pair.contains(&receiver.id) {
            return Err(AppError::Validation(
                "parent_id: reply must stay within the same conversation".to_string(),
            ));
        }
    }

    let message = sqlx::query_as::<_, MessageRow>(
        r#"
        INSERT INTO messages
            (id, sender_id, receiver_id, subject, content, is_urgent, parent_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(sender.id)
    .bind(receiver.id)
    .bind(&req.subject)
    .bind(req.content.trim())
    .bind(req.is_urgent)
    .bind(req.parent_id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(message))
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/messages/conversations
pub async fn handle_list_conversations(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<ConversationSummary>>, AppError> {
    let user = fetch_user(&state.db, params.user_id).await?;
    let messages = sqlx::query_as::<_, MessageRow>(
        "SELECT * FROM messages WHERE sender_id = $1 OR receiver_id = $1",
    )
    .bind(user.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(group_conversations(user.id, &messages)))
}

#[derive(Deserialize)]
pub struct ThreadQuery {
    pub user_id: Uuid,
    pub with: Uuid,
}

/// GET /api/v1/messages/thread
/// Full exchange with one counterpart, oldest first.
pub async fn handle_get_thread(
    State(state): State<AppState>,
    Query(params): Query<ThreadQuery>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    let user = fetch_user(&state.db, params.user_id).await?;
    let messages = sqlx::query_as::<_, MessageRow>(
        r#"
        SELECT * FROM messages
        WHERE (sender_id = $1 AND receiver_id = $2)
           OR (sender_id = $2 AND receiver_id = $1)
        ORDER BY created_at ASC
        "#,
    )
    .bind(user.id)
    .bind(params.with)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(messages))
}

#[derive(Serialize)]
pub struct ReadAck {
    pub status: &'static str,
    pub message_id: Uuid,
    pub already_read: bool,
}

/// POST /api/v1/messages/:id/read
/// Receiver-only and idempotent: marking twice acknowledges without error.
pub async fn handle_mark_read(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UserIdQuery>,
) -> Result<Json<ReadAck>, AppError> {
    let user = fetch_user(&state.db, req.user_id).await?;
    let message = sqlx::query_as::<_, MessageRow>("SELECT * FROM messages WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Message {id} not found")))?;

    if message.receiver_id != user.id {
        return Err(AppError::Forbidden(
            "Only the receiver can mark a message read".to_string(),
        ));
    }

    if !message.is_read {
        sqlx::query("UPDATE messages SET is_read = TRUE WHERE id = $1")
            .bind(id)
            .execute(&state.db)
            .await?;
    }

    Ok(Json(ReadAck {
        status: "ok",
        message_id: id,
        already_read: message.is_read,
    }))
}
