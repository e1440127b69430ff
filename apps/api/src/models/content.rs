use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "content_type", rename_all = "snake_case")]
pub enum ContentType {
    Article,
    Video,
    Tip,
}

/// Which trimester a content item targets. `All` matches every reader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "trimester_target", rename_all = "snake_case")]
pub enum TrimesterTarget {
    All,
    First,
    Second,
    Third,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationalContentRow {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub summary: Option<String>,
    pub content_type: ContentType,
    pub trimester_target: TrimesterTarget,
    pub body: String,
    pub is_featured: bool,
    pub is_active: bool,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
}
