use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A directed message. Content is immutable; only `is_read` ever changes,
/// and only by the receiver. `parent_id` links replies into a thread tree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub subject: Option<String>,
    pub content: String,
    pub is_urgent: bool,
    pub is_read: bool,
    pub parent_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
