use axum::{
    extract::{Query, State},
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, AuditLogEntry, AuditLogParams};

use crate::auth::extractors::{RoleRequired, ADMIN};
use crate::repo;

/// GET /api/admin/logs
///
/// Audit trail, newest first. Admin only.
#[utoipa::path(
    get,
    path = "/api/admin/logs",
    params(AuditLogParams),
    responses(
        (status = 200, description = "Audit log entries", body = Vec<AuditLogEntry>),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "Caller is not an admin", body = AppError)
    ),
    tag = "admin"
)]
pub async fn list_audit_logs(
    State(pool): State<Pool<Postgres>>,
    _admin: RoleRequired<ADMIN>,
    Query(params): Query<AuditLogParams>,
) -> Result<Json<Vec<AuditLogEntry>>, AppError> {
    Ok(Json(repo::audit::list(&pool, &params).await?))
}
