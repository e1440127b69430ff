use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::appointments::lifecycle::schedule_time_ok;
use crate::errors::AppError;
use crate::models::appointment::{AppointmentRow, AppointmentStatus, AppointmentType};
use crate::models::user::Role;
use crate::state::AppState;
use crate::users::{fetch_user, fetch_user_with_role};

#[derive(Deserialize)]
pub struct CreateAppointmentRequest {
    pub user_id: Uuid,
    pub clinician_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub appointment_type: AppointmentType,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub reason: Option<String>,
}

/// POST /api/v1/appointments
pub async fn handle_create_appointment(
    State(state): State<AppState>,
    Json(req): Json<CreateAppointmentRequest>,
) -> Result<Json<AppointmentRow>, AppError> {
    let mother = fetch_user_with_role(&state.db, req.user_id, Role::Mother).await?;
    let clinician = fetch_user(&state.db, req.clinician_id).await?;
    if clinician.role != Role::Clinician {
        return Err(AppError::Validation(
            "clinician_id: must refer to a clinician account".to_string(),
        ));
    }
    if !schedule_time_ok(req.scheduled_at, Utc::now()) {
        return Err(AppError::Validation(
            "scheduled_at: must be in the future".to_string(),
        ));
    }
    let duration = req.duration_minutes.unwrap_or(30);
    if duration <= 0 {
        return Err(AppError::Validation(
            "duration_minutes: must be positive".to_string(),
        ));
    }

    let appointment = sqlx::query_as::<_, AppointmentRow>(
        r#"
        INSERT INTO appointments
            (id, mother_id, clinician_id, scheduled_at, duration_minutes,
             appointment_type, location, reason)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(mother.id)
    .bind(clinician.id)
    .bind(req.scheduled_at)
    .bind(duration)
    .bind(req.appointment_type)
    .bind(&req.location)
    .bind(&req.reason)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Booked appointment {} for mother {} with clinician {}",
        appointment.id,
        mother.id,
        clinician.id
    );
    Ok(Json(appointment))
}

#[derive(Deserialize)]
pub struct ListAppointmentsQuery {
    pub user_id: Uuid,
    pub status: Option<AppointmentStatus>,
    #[serde(default)]
    pub upcoming: bool,
}

/// GET /api/v1/appointments
/// Lists appointments where the user is a participant (either side),
/// optionally narrowed by status or to upcoming slots only. Ascending by
/// scheduled time, for upcoming views.
pub async fn handle_list_appointments(
    State(state): State<AppState>,
    Query(params): Query<ListAppointmentsQuery>,
) -> Result<Json<Vec<AppointmentRow>>, AppError> {
    let user = fetch_user(&state.db, params.user_id).await?;

    let appointments = sqlx::query_as::<_, AppointmentRow>(
        r#"
        SELECT * FROM appointments
        WHERE (mother_id = $1 OR clinician_id = $1)
          AND ($2::appointment_status IS NULL OR status = $2)
          AND (NOT $3 OR scheduled_at >= NOW())
        ORDER BY scheduled_at ASC
        "#,
    )
    .bind(user.id)
    .bind(params.status)
    .bind(params.upcoming)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(appointments))
}

#[derive(Deserialize)]
pub struct TransitionRequest {
    pub user_id: Uuid,
    pub status: AppointmentStatus,
}

/// PATCH /api/v1/appointments/:id/status
/// Either participant may confirm or cancel; completion and no-show are
/// recorded by the clinician.
pub async fn handle_transition_appointment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TransitionRequest>,
) -> Result<Json<AppointmentRow>, AppError> {
    let user = fetch_user(&state.db, req.user_id).await?;
    let appointment =
        sqlx::query_as::<_, AppointmentRow>("SELECT * FROM appointments WHERE id = $1")
            .bind(id)
            .fetch_optional(&state.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Appointment {id} not found")))?;

    let is_mother = appointment.mother_id == user.id;
    let is_clinician = appointment.clinician_id == user.id;
    if !is_mother && !is_clinician {
        return Err(AppError::Forbidden(
            "Only a participant can change this appointment".to_string(),
        ));
    }
    if matches!(
        req.status,
        AppointmentStatus::Completed | AppointmentStatus::NoShow
    ) && !is_clinician
    {
        return Err(AppError::Forbidden(
            "Only the clinician can record completion or a no-show".to_string(),
        ));
    }
    if !appointment.status.can_transition_to(req.status) {
        let reason = if appointment.status.is_terminal() {
            format!("appointment is already {:?}", appointment.status)
        } else {
            format!("{:?} -> {:?} is not allowed", appointment.status, req.status)
        };
        return Err(AppError::Conflict(format!(
            "Cannot change appointment status: {reason}"
        )));
    }

    let appointment = sqlx::query_as::<_, AppointmentRow>(
        "UPDATE appointments SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(req.status)
    .bind(id)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Appointment {} moved to {:?}",
        appointment.id,
        appointment.status
    );
    Ok(Json(appointment))
}
