use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sqlx::{Pool, Postgres};

use super::cookies;
use super::jwt::validate_session_token;
use crate::repo;

/// Permissive auth middleware.
///
/// Validates the session token from the cookie (or Bearer header), checks
/// that its `sessions` row is neither expired nor revoked, and inserts the
/// [`Claims`](super::jwt::Claims) into request extensions. Never rejects:
/// handlers decide authorization through the extractors.
pub async fn auth_middleware(
    State(pool): State<Pool<Postgres>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = cookies::extract_session_token(req.headers()) {
        match validate_session_token(&token) {
            Ok(claims) => match repo::session::is_live(&pool, &claims.sid, claims.sub).await {
                Ok(true) => {
                    req.extensions_mut().insert(claims);
                }
                Ok(false) => {
                    tracing::debug!(user_id = claims.sub, "session revoked or expired");
                }
                Err(e) => {
                    tracing::warn!(error = %e.message, "session lookup failed");
                }
            },
            Err(e) => {
                tracing::debug!(error = %e, "rejected session token");
            }
        }
    }

    next.run(req).await
}
