use shared_types::{
    eq_filter, page_window, AppError, Bail, BailListParams, CreateBailRequest, UpdateBailRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

// NUMERIC amounts are read back as FLOAT8 to decode into f64.
const BAIL_COLUMNS: &str =
    "id, case_id, surety_id, status, amount::FLOAT8 AS amount, bail_date, remarks, bail_condition";

pub async fn create(db: impl PgExecutor<'_>, req: &CreateBailRequest) -> Result<Bail, AppError> {
    let sql = format!(
        r#"
        INSERT INTO bails (case_id, surety_id, amount, status, bail_date, remarks, bail_condition)
        VALUES ($1, $2, $3::NUMERIC, $4, $5, $6, $7)
        RETURNING {BAIL_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Bail>(&sql)
        .bind(req.case_id)
        .bind(req.surety_id)
        .bind(req.amount)
        .bind(req.status.as_deref())
        .bind(req.bail_date)
        .bind(req.remarks.as_deref())
        .bind(req.bail_condition.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Bail>, AppError> {
    let sql = format!("SELECT {BAIL_COLUMNS} FROM bails WHERE id = $1");
    sqlx::query_as::<_, Bail>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list(db: impl PgExecutor<'_>, params: &BailListParams) -> Result<Vec<Bail>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {BAIL_COLUMNS} FROM bails
        WHERE ($1::BIGINT IS NULL OR case_id = $1)
          AND ($2::TEXT IS NULL OR LOWER(status) = $2)
        ORDER BY id
        LIMIT $3 OFFSET $4
        "#
    );
    sqlx::query_as::<_, Bail>(&sql)
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
    req: &UpdateBailRequest,
) -> Result<Option<Bail>, AppError> {
    let sql = format!(
        r#"
        UPDATE bails SET
            surety_id      = COALESCE($2, surety_id),
            amount         = COALESCE($3::NUMERIC, amount),
            status         = COALESCE($4, status),
            bail_date      = COALESCE($5, bail_date),
            remarks        = COALESCE($6, remarks),
            bail_condition = COALESCE($7, bail_condition)
        WHERE id = $1
        RETURNING {BAIL_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Bail>(&sql)
        .bind(id)
        .bind(req.surety_id)
        .bind(req.amount)
        .bind(req.status.as_deref())
        .bind(req.bail_date)
        .bind(req.remarks.as_deref())
        .bind(req.bail_condition.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM bails WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
