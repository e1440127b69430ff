use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::appointment::AppointmentRow;
use crate::models::content::{EducationalContentRow, TrimesterTarget};
use crate::models::message::MessageRow;
use crate::models::pregnancy::{HealthMetricRow, PregnancyRow};
use crate::models::user::Role;
use crate::pregnancy::handlers::ProfileResponse;
use crate::pregnancy::progress::Trimester;
use crate::state::AppState;
use crate::users::fetch_user;

/// Role-specific landing payload. The role is decided once here; each
/// variant composes its own queries.
#[derive(Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardResponse {
    Mother {
        pregnancy: Option<ProfileResponse>,
        recent_metrics: Vec<HealthMetricRow>,
        upcoming_appointments: Vec<AppointmentRow>,
        unread_messages: i64,
        featured_content: Vec<EducationalContentRow>,
    },
    Clinician {
        upcoming_appointments: Vec<AppointmentRow>,
        recent_messages: Vec<MessageRow>,
        unresponded_alerts: i64,
        patients: i64,
    },
    Admin {
        mothers: i64,
        clinicians: i64,
        content_items: i64,
        open_alerts: i64,
    },
}

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = fetch_user(&state.db, params.user_id).await?;
    let response = match user.role {
        Role::Mother => mother_dashboard(&state.db, user.id).await?,
        Role::Clinician => clinician_dashboard(&state.db, user.id).await?,
        Role::Admin => admin_dashboard(&state.db).await?,
    };
    Ok(Json(response))
}

async fn mother_dashboard(pool: &PgPool, user_id: Uuid) -> Result<DashboardResponse, AppError> {
    let profile = sqlx::query_as::<_, PregnancyRow>(
        "SELECT * FROM pregnancies WHERE mother_id = $1 AND is_active",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    let (recent_metrics, featured_content) = match &profile {
        Some(p) => {
            let metrics = sqlx::query_as::<_, HealthMetricRow>(
                "SELECT * FROM health_metrics WHERE pregnancy_id = $1 ORDER BY recorded_at DESC LIMIT 5",
            )
            .bind(p.id)
            .fetch_all(pool)
            .await?;

            let today = chrono::Utc::now().date_naive();
            let trimester =
                crate::pregnancy::progress::compute(p.lmp_date, p.due_date, today).trimester;
            let target = match trimester {
                Trimester::First => TrimesterTarget::First,
                Trimester::Second => TrimesterTarget::Second,
                Trimester::Third => TrimesterTarget::Third,
            };
            let content = sqlx::query_as::<_, EducationalContentRow>(
                r#"
                SELECT * FROM educational_content
                WHERE is_active AND is_featured
                  AND (trimester_target = 'all' OR trimester_target = $1)
                ORDER BY created_at DESC
                LIMIT 3
                "#,
            )
            .bind(target)
            .fetch_all(pool)
            .await?;
            (metrics, content)
        }
        None => (Vec::new(), Vec::new()),
    };

    let upcoming_appointments = sqlx::query_as::<_, AppointmentRow>(
        r#"
        SELECT * FROM appointments
        WHERE mother_id = $1
          AND status IN ('scheduled', 'confirmed')
          AND scheduled_at >= NOW()
        ORDER BY scheduled_at ASC
        LIMIT 5
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let unread_messages: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND NOT is_read",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(DashboardResponse::Mother {
        pregnancy: profile.map(ProfileResponse::new),
        recent_metrics,
        upcoming_appointments,
        unread_messages,
        featured_content,
    })
}

async fn clinician_dashboard(pool: &PgPool, user_id: Uuid) -> Result<DashboardResponse, AppError> {
    let upcoming_appointments = sqlx::query_as::<_, AppointmentRow>(
        r#"
        SELECT * FROM appointments
        WHERE clinician_id = $1
          AND status IN ('scheduled', 'confirmed')
          AND scheduled_at >= NOW()
        ORDER BY scheduled_at ASC
        LIMIT 10
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let recent_messages = sqlx::query_as::<_, MessageRow>(
        "SELECT * FROM messages WHERE receiver_id = $1 ORDER BY created_at DESC LIMIT 5",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let unresponded_alerts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM emergency_alerts WHERE NOT is_responded")
            .fetch_one(pool)
            .await?;

    let patients: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(Role::Mother)
        .fetch_one(pool)
        .await?;

    Ok(DashboardResponse::Clinician {
        upcoming_appointments,
        recent_messages,
        unresponded_alerts,
        patients,
    })
}

async fn admin_dashboard(pool: &PgPool) -> Result<DashboardResponse, AppError> {
    let mothers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(Role::Mother)
        .fetch_one(pool)
        .await?;
    let clinicians: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = $1")
        .bind(Role::Clinician)
        .fetch_one(pool)
        .await?;
    let content_items: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM educational_content WHERE is_active")
            .fetch_one(pool)
            .await?;
    let open_alerts: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM emergency_alerts WHERE NOT is_responded")
            .fetch_one(pool)
            .await?;

    Ok(DashboardResponse::Admin {
        mothers,
        clinicians,
        content_items,
        open_alerts,
    })
}
