use sqlx::PgPool;

use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Kept alongside the pool so handlers can read runtime settings without
    /// re-reading the environment.
    #[allow(dead_code)]
    pub config: Config,
}
