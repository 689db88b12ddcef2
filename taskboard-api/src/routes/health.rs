/// Health check endpoint
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool": { "active_connections": 1, "idle_connections": 3, "total_connections": 4 }
/// }
/// ```
///
/// Always answers 200; a failed database ping shows up as `"degraded"`.

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use taskboard_shared::db::pool::{get_pool_stats, health_check as ping, PoolStats};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: &'static str,

    /// Application version
    pub version: &'static str,

    /// `connected` or `disconnected`
    pub database: &'static str,

    /// Connection pool usage
    pub pool: PoolStats,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match ping(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database: if connected { "connected" } else { "disconnected" },
        pool: get_pool_stats(&state.db),
    })
}
