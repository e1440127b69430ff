use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One pregnancy per row; at most one active row per mother (enforced by a
/// partial unique index). Trimester and progress are computed on read from
/// `lmp_date`/`due_date`, never stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PregnancyRow {
    pub id: Uuid,
    pub mother_id: Uuid,
    pub lmp_date: NaiveDate,
    pub due_date: NaiveDate,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single vitals entry. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HealthMetricRow {
    pub id: Uuid,
    pub pregnancy_id: Uuid,
    pub weight_kg: Option<f64>,
    pub systolic: Option<i32>,
    pub diastolic: Option<i32>,
    pub heart_rate: Option<i32>,
    pub temperature_c: Option<f64>,
    pub symptoms: Option<String>,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
}
