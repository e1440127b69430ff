use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::alert::{EmergencyAlertRow, UrgencyLevel};
use crate::models::user::Role;
use crate::state::AppState;
use crate::users::fetch_user_with_role;

#[derive(Deserialize)]
pub struct CreateAlertRequest {
    pub user_id: Uuid,
    pub urgency: UrgencyLevel,
    pub symptoms: String,
    pub location: Option<String>,
}

/// POST /api/v1/alerts
/// Only mothers raise alerts. No notification transport is attached here;
/// clinicians poll the unresponded list.
pub async fn handle_create_alert(
    State(state): State<AppState>,
    Json(req): Json<CreateAlertRequest>,
) -> Result<Json<EmergencyAlertRow>, AppError> {
    let mother = fetch_user_with_role(&state.db, req.user_id, Role::Mother).await?;
    if req.symptoms.trim().is_empty() {
        return Err(AppError::Validation(
            "symptoms: must not be empty".to_string(),
        ));
    }

    let alert = sqlx::query_as::<_, EmergencyAlertRow>(
        r#"
        INSERT INTO emergency_alerts (id, mother_id, urgency, symptoms, location)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(mother.id)
    .bind(req.urgency)
    .bind(req.symptoms.trim())
    .bind(&req.location)
    .fetch_one(&state.db)
    .await?;

    tracing::info!(
        "Emergency alert {} raised by mother {} ({:?})",
        alert.id,
        mother.id,
        alert.urgency
    );
    Ok(Json(alert))
}

#[derive(Deserialize)]
pub struct ListAlertsQuery {
    pub user_id: Uuid,
    #[serde(default)]
    pub unresponded: bool,
}

/// GET /api/v1/alerts
/// Clinician triage view: most urgent first, then newest.
pub async fn handle_list_alerts(
    State(state): State<AppState>,
    Query(params): Query<ListAlertsQuery>,
) -> Result<Json<Vec<EmergencyAlertRow>>, AppError> {
    fetch_user_with_role(&state.db, params.user_id, Role::Clinician).await?;

    let alerts = sqlx::query_as::<_, EmergencyAlertRow>(
        r#"
        SELECT * FROM emergency_alerts
        WHERE (NOT $1 OR NOT is_responded)
        ORDER BY urgency DESC, created_at DESC
        "#,
    )
    .bind(params.unresponded)
    .fetch_all(&state.db)
    .await?;
    Ok(Json(alerts))
}

#[derive(Deserialize)]
pub struct RespondAlertRequest {
    pub user_id: Uuid,
    pub response_notes: Option<String>,
}

/// POST /api/v1/alerts/:id/respond
/// First clinician response wins; a second attempt gets a conflict instead
/// of silently overwriting the responder.
pub async fn handle_respond_alert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RespondAlertRequest>,
) -> Result<Json<EmergencyAlertRow>, AppError> {
    let clinician = fetch_user_with_role(&state.db, req.user_id, Role::Clinician).await?;

    // Guarded update: only flips an unresponded alert, so concurrent
    // responders race safely and exactly one wins.
    let responded = sqlx::query_as::<_, EmergencyAlertRow>(
        r#"
        UPDATE emergency_alerts
        SET is_responded = TRUE, responder_id = $1, response_notes = $2, responded_at = NOW()
        WHERE id = $3 AND NOT is_responded
        RETURNING *
        "#,
    )
    .bind(clinician.id)
    .bind(&req.response_notes)
    .bind(id)
    .fetch_optional(&state.db)
    .await?;

    match responded {
        Some(alert) => {
            tracing::info!("Alert {} responded by clinician {}", alert.id, clinician.id);
            Ok(Json(alert))
        }
        None => {
            let exists: Option<Uuid> =
                sqlx::query_scalar("SELECT id FROM emergency_alerts WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&state.db)
                    .await?;
            if exists.is_some() {
                Err(AppError::Conflict(
                    "Alert has already been responded to".to_string(),
                ))
            } else {
                Err(AppError::NotFound(format!("Alert {id} not found")))
            }
        }
    }
}
