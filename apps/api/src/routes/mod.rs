pub mod health;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::state::AppState;
use crate::{alerts, appointments, content, dashboard, messaging, pregnancy, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Identity
        .route(
            "/api/v1/users",
            post(users::handlers::handle_register).get(users::handlers::handle_list_by_role),
        )
        .route("/api/v1/users/:id", get(users::handlers::handle_get_user))
        // Pregnancy tracking
        .route(
            "/api/v1/pregnancies",
            post(pregnancy::handlers::handle_create_pregnancy),
        )
        .route(
            "/api/v1/pregnancies/active",
            get(pregnancy::handlers::handle_get_active_pregnancy),
        )
        .route(
            "/api/v1/pregnancies/:id",
            get(pregnancy::handlers::handle_get_pregnancy),
        )
        .route(
            "/api/v1/pregnancies/:id/deactivate",
            post(pregnancy::handlers::handle_deactivate_pregnancy),
        )
        .route(
            "/api/v1/pregnancies/:id/metrics",
            post(pregnancy::handlers::handle_log_metric)
                .get(pregnancy::handlers::handle_list_metrics),
        )
        .route("/api/v1/weeks/:week", get(pregnancy::handlers::handle_week_info))
        // Appointments
        .route(
            "/api/v1/appointments",
            post(appointments::handlers::handle_create_appointment)
                .get(appointments::handlers::handle_list_appointments),
        )
        .route(
            "/api/v1/appointments/:id/status",
            patch(appointments::handlers::handle_transition_appointment),
        )
        // Messaging
        .route(
            "/api/v1/messages",
            post(messaging::handlers::handle_send_message),
        )
        .route(
            "/api/v1/messages/conversations",
            get(messaging::handlers::handle_list_conversations),
        )
        .route(
            "/api/v1/messages/thread",
            get(messaging::handlers::handle_get_thread),
        )
        .route(
            "/api/v1/messages/:id/read",
            post(messaging::handlers::handle_mark_read),
        )
        // Emergency alerts
        .route(
            "/api/v1/alerts",
            post(alerts::handlers::handle_create_alert).get(alerts::handlers::handle_list_alerts),
        )
        .route(
            "/api/v1/alerts/:id/respond",
            post(alerts::handlers::handle_respond_alert),
        )
        // Educational content
        .route(
            "/api/v1/content",
            post(content::handlers::handle_create_content)
                .get(content::handlers::handle_browse_content),
        )
        .route(
            "/api/v1/content/:slug",
            get(content::handlers::handle_get_content)
                .patch(content::handlers::handle_update_content),
        )
        // Dashboard
        .route(
            "/api/v1/dashboard",
            get(dashboard::handlers::handle_dashboard),
        )
        .with_state(state)
}
