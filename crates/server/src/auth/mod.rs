pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;

use axum::http::HeaderValue;
use shared_types::{AppError, Role};
use sqlx::PgConnection;

use crate::repo;

/// Create a `sessions` row for the user and return the Set-Cookie header
/// carrying its signed token. Runs on the caller's transaction so a failed
/// signup or profile completion never leaves a session behind.
pub async fn issue_session(
    conn: &mut PgConnection,
    user_id: i64,
    email: &str,
    role: Role,
) -> Result<HeaderValue, AppError> {
    let expires_at = jwt::session_expiry();
    let sid = repo::session::create(&mut *conn, user_id, expires_at).await?;
    let token = jwt::create_session_token(user_id, email, role, &sid.to_string(), expires_at)
        .map_err(|e| AppError::internal(format!("Failed to sign session token: {e}")))?;
    cookies::build_session_cookie(&token, jwt::session_ttl_hours())
}
