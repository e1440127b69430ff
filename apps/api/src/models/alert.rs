use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Ordinal severity of an emergency alert. Postgres orders enum values by
/// declaration order, so `ORDER BY urgency DESC` surfaces critical first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "urgency_level", rename_all = "snake_case")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Mother-initiated urgent record. `is_responded` is monotonic false -> true;
/// the first clinician response wins.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmergencyAlertRow {
    pub id: Uuid,
    pub mother_id: Uuid,
    pub urgency: UrgencyLevel,
    pub symptoms: String,
    pub location: Option<String>,
    pub is_responded: bool,
    pub responder_id: Option<Uuid>,
    pub response_notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub responded_at: Option<DateTime<Utc>>,
}
