use shared_types::{
    page_window, AppError, CaseHistory, CreateCaseHistoryRequest, PageParams,
    UpdateCaseHistoryRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const HISTORY_COLUMNS: &str =
    "id, case_id, action_date, action_taken, remarks, created_at, updated_at";

/// `action_date` defaults to today.
pub async fn create(
    db: impl PgExecutor<'_>,
    case_id: i64,
    req: &CreateCaseHistoryRequest,
) -> Result<CaseHistory, AppError> {
    let sql = format!(
        r#"
        INSERT INTO case_history (case_id, action_date, action_taken, remarks)
        VALUES ($1, COALESCE($2, CURRENT_DATE), $3, $4)
        RETURNING {HISTORY_COLUMNS}
        "#
    );
    sqlx::query_as::<_, CaseHistory>(&sql)
        .bind(case_id)
        .bind(req.action_date)
        .bind(req.action_taken.as_deref().map(str::trim))
        .bind(req.remarks.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<CaseHistory>, AppError> {
    let sql = format!("SELECT {HISTORY_COLUMNS} FROM case_history WHERE id = $1");
    sqlx::query_as::<_, CaseHistory>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Chronological.
pub async fn list_for_case(
    db: impl PgExecutor<'_>,
    case_id: i64,
    page: &PageParams,
) -> Result<Vec<CaseHistory>, AppError> {
    let (limit, offset) = page_window(page.limit, page.offset);
    let sql = format!(
        r#"
        SELECT {HISTORY_COLUMNS} FROM case_history
        WHERE case_id = $1
        ORDER BY action_date NULLS LAST, id
        LIMIT $2 OFFSET $3
        "#
    );
    sqlx::query_as::<_, CaseHistory>(&sql)
        .bind(case_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateCaseHistoryRequest,
) -> Result<Option<CaseHistory>, AppError> {
    let sql = format!(
        r#"
        UPDATE case_history SET
            action_date  = COALESCE($2, action_date),
            action_taken = COALESCE($3, action_taken),
            remarks      = COALESCE($4, remarks),
            updated_at   = NOW()
        WHERE id = $1
        RETURNING {HISTORY_COLUMNS}
        "#
    );
    sqlx::query_as::<_, CaseHistory>(&sql)
        .bind(id)
        .bind(req.action_date)
        .bind(req.action_taken.as_deref())
        .bind(req.remarks.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM case_history WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
