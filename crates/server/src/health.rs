use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the process start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

fn uptime_seconds() -> u64 {
    START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0)
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: String,
    pub db: String,
    pub uptime_seconds: u64,
    pub version: String,
}

impl HealthResponse {
    fn from_ping(ping: Result<(), String>) -> (StatusCode, Self) {
        let (code, status, db) = match ping {
            Ok(()) => (StatusCode::OK, "ok", "connected".to_string()),
            Err(e) => (StatusCode::SERVICE_UNAVAILABLE, "degraded", format!("error: {e}")),
        };
        (
            code,
            Self {
                status: status.to_string(),
                db,
                uptime_seconds: uptime_seconds(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        )
    }
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthResponse),
        (status = 503, description = "Database unreachable", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(pool): State<Pool<Postgres>>) -> (StatusCode, Json<HealthResponse>) {
    let ping = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&pool)
        .await
        .map(|_| ())
        .map_err(|e| e.to_string());

    if let Err(e) = &ping {
        tracing::warn!(error = %e, "health check could not reach the database");
    }

    let (code, body) = HealthResponse::from_ping(ping);
    (code, Json(body))
}
