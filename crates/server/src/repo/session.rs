use chrono::{DateTime, Utc};
use shared_types::AppError;
use sqlx::PgExecutor;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Insert a new session row and return its id.
pub async fn create(
    db: impl PgExecutor<'_>,
    user_id: i64,
    expires_at: DateTime<Utc>,
) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(user_id)
        .bind(expires_at)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(id)
}

/// True when the session exists for this user, is not revoked and has not expired.
/// A malformed id is simply not live.
pub async fn is_live(db: impl PgExecutor<'_>, sid: &str, user_id: i64) -> Result<bool, AppError> {
    let Ok(id) = Uuid::parse_str(sid) else {
        return Ok(false);
    };
    let live: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM sessions
            WHERE id = $1 AND user_id = $2 AND revoked_at IS NULL AND expires_at > NOW()
        )
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_one(db)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(live)
}

/// Mark a session revoked. Revoking an unknown or already revoked session is a no-op.
pub async fn revoke(db: impl PgExecutor<'_>, sid: &str) -> Result<(), AppError> {
    let Ok(id) = Uuid::parse_str(sid) else {
        return Ok(());
    };
    sqlx::query("UPDATE sessions SET revoked_at = NOW() WHERE id = $1 AND revoked_at IS NULL")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}
