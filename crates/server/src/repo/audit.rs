use shared_types::{eq_filter, page_window, AppError, AuditLogEntry, AuditLogParams};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

/// Append an audit row. Called on the same transaction as the change it
/// describes so the two commit or roll back together.
pub async fn record(
    db: impl PgExecutor<'_>,
    admin_id: Option<i64>,
    action_type: &str,
    entity_type: &str,
    description: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO audit_log (admin_id, action_type, entity_type, description)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(admin_id)
    .bind(action_type)
    .bind(entity_type)
    .bind(description)
    .execute(db)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Newest first.
pub async fn list(db: impl PgExecutor<'_>, params: &AuditLogParams) -> Result<Vec<AuditLogEntry>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    sqlx::query_as::<_, AuditLogEntry>(
        r#"
        SELECT id, admin_id, action_type, entity_type, description, status, action_at
        FROM audit_log
        WHERE ($1::TEXT IS NULL OR LOWER(entity_type) = $1)
        ORDER BY action_at DESC, id DESC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(eq_filter(params.entity_type.as_deref()))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
