use shared_types::{
    page_window, AppError, CaseChildListParams, CreateRemandRequest, Remand, UpdateRemandRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const REMAND_COLUMNS: &str = "id, case_id, start_date, end_date, remand_type, reason, remanded_at";

pub async fn create(db: impl PgExecutor<'_>, req: &CreateRemandRequest) -> Result<Remand, AppError> {
    let sql = format!(
        r#"
        INSERT INTO remands (case_id, start_date, end_date, remand_type, reason)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {REMAND_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Remand>(&sql)
        .bind(req.case_id)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.remand_type.as_deref())
        .bind(req.reason.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Remand>, AppError> {
    let sql = format!("SELECT {REMAND_COLUMNS} FROM remands WHERE id = $1");
    sqlx::query_as::<_, Remand>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list(db: impl PgExecutor<'_>, params: &CaseChildListParams) -> Result<Vec<Remand>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {REMAND_COLUMNS} FROM remands
        WHERE ($1::BIGINT IS NULL OR case_id = $1)
        ORDER BY start_date, id
        LIMIT $2 OFFSET $3
        "#
    );
    sqlx::query_as::<_, Remand>(&sql)
        .bind(params.case_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// A patch that moves only one end of the window is checked by the
/// `remands_window_check` constraint against the stored other end.
pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateRemandRequest,
) -> Result<Option<Remand>, AppError> {
    let sql = format!(
        r#"
        UPDATE remands SET
            start_date  = COALESCE($2, start_date),
            end_date    = COALESCE($3, end_date),
            remand_type = COALESCE($4, remand_type),
            reason      = COALESCE($5, reason)
        WHERE id = $1
        RETURNING {REMAND_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Remand>(&sql)
        .bind(id)
        .bind(req.start_date)
        .bind(req.end_date)
        .bind(req.remand_type.as_deref())
        .bind(req.reason.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM remands WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
