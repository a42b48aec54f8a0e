use shared_types::{
    eq_filter, page_window, AppError, Appeal, AppealListParams, CreateAppealRequest,
    UpdateAppealRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const APPEAL_COLUMNS: &str = "id, case_id, appeal_date, status, decision_date, decision";

pub async fn create(db: impl PgExecutor<'_>, req: &CreateAppealRequest) -> Result<Appeal, AppError> {
    let sql = format!(
        r#"
        INSERT INTO appeals (case_id, appeal_date, status, decision_date, decision)
        VALUES ($1, $2, COALESCE($3, 'Pending'), $4, $5)
        RETURNING {APPEAL_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Appeal>(&sql)
        .bind(req.case_id)
        .bind(req.appeal_date)
        .bind(req.status.as_deref())
        .bind(req.decision_date)
        .bind(req.decision.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Appeal>, AppError> {
    let sql = format!("SELECT {APPEAL_COLUMNS} FROM appeals WHERE id = $1");
    sqlx::query_as::<_, Appeal>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list(db: impl PgExecutor<'_>, params: &AppealListParams) -> Result<Vec<Appeal>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {APPEAL_COLUMNS} FROM appeals
        WHERE ($1::BIGINT IS NULL OR case_id = $1)
          AND ($2::TEXT IS NULL OR LOWER(status) = $2)
        ORDER BY appeal_date, id
        LIMIT $3 OFFSET $4
        "#
    );
    sqlx::query_as::<_, Appeal>(&sql)
        .bind(params.case_id)
        .bind(eq_filter(params.status.as_deref()))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateAppealRequest,
) -> Result<Option<Appeal>, AppError> {
    let sql = format!(
        r#"
        UPDATE appeals SET
            appeal_date   = COALESCE($2, appeal_date),
            status        = COALESCE($3, status),
            decision_date = COALESCE($4, decision_date),
            decision      = COALESCE($5, decision)
        WHERE id = $1
        RETURNING {APPEAL_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Appeal>(&sql)
        .bind(id)
        .bind(req.appeal_date)
        .bind(req.status.as_deref())
        .bind(req.decision_date)
        .bind(req.decision.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM appeals WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
