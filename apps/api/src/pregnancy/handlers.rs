use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::pregnancy::{HealthMetricRow, PregnancyRow};
use crate::models::user::{Role, UserRow};
use crate::pregnancy::progress::{self, Progress};
use crate::pregnancy::vitals::{describe_errors, validate_metrics, MetricInput};
use crate::pregnancy::week_info;
use crate::state::AppState;
use crate::users::{fetch_user, fetch_user_with_role};

/// A profile plus its progress, derived at response time.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub profile: PregnancyRow,
    pub progress: Progress,
}

impl ProfileResponse {
    pub fn new(profile: PregnancyRow) -> Self {
        let today = Utc::now().date_naive();
        let progress = progress::compute(profile.lmp_date, profile.due_date, today);
        Self { profile, progress }
    }
}

#[derive(Deserialize)]
pub struct CreatePregnancyRequest {
    pub user_id: Uuid,
    pub lmp_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// POST /api/v1/pregnancies
pub async fn handle_create_pregnancy(
    State(state): State<AppState>,
    Json(req): Json<CreatePregnancyRequest>,
) -> Result<Json<ProfileResponse>, AppError> {
    let mother = fetch_user_with_role(&state.db, req.user_id, Role::Mother).await?;

    let today = Utc::now().date_naive();
    if req.lmp_date > today {
        return Err(AppError::Validation(
            "lmp_date: must not be in the future".to_string(),
        ));
    }
    let due_date = req
        .due_date
        .unwrap_or_else(|| progress::default_due_date(req.lmp_date));
    if due_date <= req.lmp_date {
        return Err(AppError::Validation(
            "due_date: must fall after the start date".to_string(),
        ));
    }

    let active: Option<Uuid> = sqlx::query_scalar(
        "SELECT id FROM pregnancies WHERE mother_id = $1 AND is_active",
    )
    .bind(mother.id)
    .fetch_optional(&state.db)
    .await?;
    if active.is_some() {
        return Err(AppError::Conflict(
            "An active pregnancy already exists for this account".to_string(),
        ));
    }

    let profile = sqlx::query_as::<_, PregnancyRow>(
        r#"
        INSERT INTO pregnancies (id, mother_id, lmp_date, due_date, notes)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(mother.id)
    .bind(req.lmp_date)
    .bind(due_date)
    .bind(&req.notes)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Created pregnancy {} for mother {}", profile.id, mother.id);
    Ok(Json(ProfileResponse::new(profile)))
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/pregnancies/active
pub async fn handle_get_active_pregnancy(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let profile = sqlx::query_as::<_, PregnancyRow>(
        "SELECT * FROM pregnancies WHERE mother_id = $1 AND is_active",
    )
    .bind(params.user_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound("No active pregnancy for this account".to_string()))?;

    Ok(Json(ProfileResponse::new(profile)))
}

/// GET /api/v1/pregnancies/:id
pub async fn handle_get_pregnancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<ProfileResponse>, AppError> {
    let viewer = fetch_user(&state.db, params.user_id).await?;
    let profile = fetch_pregnancy(&state.db, id).await?;
    ensure_can_view(&viewer, &profile)?;
    Ok(Json(ProfileResponse::new(profile)))
}

/// POST /api/v1/pregnancies/:id/deactivate
/// Profiles are deactivated, never deleted.
pub async fn handle_deactivate_pregnancy(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UserIdQuery>,
) -> Result<Json<PregnancyRow>, AppError> {
    let mother = fetch_user_with_role(&state.db, req.user_id, Role::Mother).await?;
    let profile = fetch_pregnancy(&state.db, id).await?;
    if profile.mother_id != mother.id {
        return Err(AppError::Forbidden(
            "Only the owner can deactivate a pregnancy".to_string(),
        ));
    }

    let profile = sqlx::query_as::<_, PregnancyRow>(
        "UPDATE pregnancies SET is_active = FALSE, updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!("Deactivated pregnancy {}", profile.id);
    Ok(Json(profile))
}

#[derive(Deserialize)]
pub struct LogMetricRequest {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub metrics: MetricInput,
}

/// POST /api/v1/pregnancies/:id/metrics
pub async fn handle_log_metric(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<LogMetricRequest>,
) -> Result<Json<HealthMetricRow>, AppError> {
    let mother = fetch_user_with_role(&state.db, req.user_id, Role::Mother).await?;
    let profile = fetch_pregnancy(&state.db, id).await?;
    if profile.mother_id != mother.id {
        return Err(AppError::Forbidden(
            "Vitals can only be logged on your own pregnancy".to_string(),
        ));
    }

    let errors = validate_metrics(&req.metrics);
    if !errors.is_empty() {
        return Err(AppError::Validation(describe_errors(&errors)));
    }

    let metric = sqlx::query_as::<_, HealthMetricRow>(
        r#"
        INSERT INTO health_metrics
            (id, pregnancy_id, weight_kg, systolic, diastolic, heart_rate,
             temperature_c, symptoms, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(profile.id)
    .bind(req.metrics.weight_kg)
    .bind(req.metrics.systolic)
    .bind(req.metrics.diastolic)
    .bind(req.metrics.heart_rate)
    .bind(req.metrics.temperature_c)
    .bind(&req.metrics.symptoms)
    .bind(&req.metrics.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(metric))
}

/// GET /api/v1/pregnancies/:id/metrics
pub async fn handle_list_metrics(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<Vec<HealthMetricRow>>, AppError> {
    let viewer = fetch_user(&state.db, params.user_id).await?;
    let profile = fetch_pregnancy(&state.db, id).await?;
    ensure_can_view(&viewer, &profile)?;

    let metrics = sqlx::query_as::<_, HealthMetricRow>(
        "SELECT * FROM health_metrics WHERE pregnancy_id = $1 ORDER BY recorded_at DESC",
    )
    .bind(profile.id)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(metrics))
}

#[derive(Serialize)]
pub struct WeekInfoResponse {
    pub week: u32,
    pub baby_size: &'static str,
    pub baby_weight: &'static str,
    pub developments: Vec<&'static str>,
}

/// GET /api/v1/weeks/:week
pub async fn handle_week_info(Path(week): Path<u32>) -> Result<Json<WeekInfoResponse>, AppError> {
    let milestone = week_info::lookup(week)
        .ok_or_else(|| AppError::NotFound(format!("No information for week {week}")))?;
    Ok(Json(WeekInfoResponse {
        week,
        baby_size: milestone.baby_size,
        baby_weight: milestone.baby_weight,
        developments: milestone.developments.to_vec(),
    }))
}

async fn fetch_pregnancy(pool: &PgPool, id: Uuid) -> Result<PregnancyRow, AppError> {
    sqlx::query_as::<_, PregnancyRow>("SELECT * FROM pregnancies WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pregnancy {id} not found")))
}

/// Mothers see their own record; clinicians and admins see any.
fn ensure_can_view(viewer: &UserRow, profile: &PregnancyRow) -> Result<(), AppError> {
    match viewer.role {
        Role::Mother if profile.mother_id == viewer.id => Ok(()),
        Role::Mother => Err(AppError::Forbidden(
            "Mothers can only view their own pregnancy".to_string(),
        )),
        Role::Clinician | Role::Admin => Ok(()),
    }
}
