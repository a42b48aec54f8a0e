use shared_types::{AppError, Role, SignupRequest, User};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const USER_COLUMNS: &str =
    "id, role, firstname, lastname, email, phoneno, cnic, dob, password_hash, created_at";

/// Insert a new user. The role is already canonical; the email keeps the
/// caller's casing but is unique case-insensitively.
pub async fn create(
    db: impl PgExecutor<'_>,
    req: &SignupRequest,
    role: Role,
    password_hash: &str,
) -> Result<User, AppError> {
    let sql = format!(
        r#"
        INSERT INTO users (role, firstname, lastname, email, phoneno, cnic, dob, password_hash)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {USER_COLUMNS}
        "#
    );
    sqlx::query_as::<_, User>(&sql)
        .bind(role.as_str())
        .bind(req.firstname.trim())
        .bind(req.lastname.as_deref().map(str::trim))
        .bind(req.email.trim())
        .bind(req.phoneno.as_deref())
        .bind(req.cnic.as_deref())
        .bind(req.dob)
        .bind(password_hash)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
    sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Case-insensitive lookup, matching the `users_email_key` index.
pub async fn find_by_email(db: impl PgExecutor<'_>, email: &str) -> Result<Option<User>, AppError> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
    sqlx::query_as::<_, User>(&sql)
        .bind(email.trim())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
