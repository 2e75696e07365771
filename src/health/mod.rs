/*!
 * # Health Check Module
 *
 * `/health` reports the crate version and whether the database answers a ping.
 * A failed ping turns the response into 503 so load balancers stop routing.
 */

use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

/// Basic health status
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct HealthInfo {
    pub status: HealthStatus,
    pub version: String,
    pub database: HealthStatus,
    pub timestamp: DateTime<Utc>,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthInfo),
        (status = 503, description = "Database is unreachable", body = HealthInfo)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(db): State<Arc<DatabaseConnection>>,
) -> (StatusCode, Json<HealthInfo>) {
    let database = match crate::db::check_connection(&db).await {
        Ok(()) => HealthStatus::Up,
        Err(e) => {
            error!("Database health check failed: {}", e);
            HealthStatus::Down
        }
    };

    let (code, status) = if database == HealthStatus::Up {
        (StatusCode::OK, HealthStatus::Up)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Down)
    };

    (
        code,
        Json(HealthInfo {
            status,
            version: env!("CARGO_PKG_VERSION").to_string(),
            database,
            timestamp: Utc::now(),
        }),
    )
}

pub fn health_routes_with_state(db_pool: Arc<DatabaseConnection>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(db_pool)
}
