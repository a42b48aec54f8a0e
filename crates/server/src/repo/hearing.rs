use shared_types::{
    page_window, AppError, CreateHearingRequest, Hearing, HearingListParams, UpdateHearingRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const HEARING_COLUMNS: &str =
    "id, case_id, hearing_date, hearing_time, venue, remarks, created_at, updated_at";

pub async fn create(db: impl PgExecutor<'_>, req: &CreateHearingRequest) -> Result<Hearing, AppError> {
    let sql = format!(
        r#"
        INSERT INTO hearings (case_id, hearing_date, hearing_time, venue, remarks)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {HEARING_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Hearing>(&sql)
        .bind(req.case_id)
        .bind(req.hearing_date)
        .bind(req.hearing_time)
        .bind(req.venue.as_deref())
        .bind(req.remarks.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Hearing>, AppError> {
    let sql = format!("SELECT {HEARING_COLUMNS} FROM hearings WHERE id = $1");
    sqlx::query_as::<_, Hearing>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list(db: impl PgExecutor<'_>, params: &HearingListParams) -> Result<Vec<Hearing>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {HEARING_COLUMNS} FROM hearings
        WHERE ($1::BIGINT IS NULL OR case_id = $1)
        ORDER BY hearing_date, hearing_time NULLS LAST, id
        LIMIT $2 OFFSET $3
        "#
    );
    sqlx::query_as::<_, Hearing>(&sql)
        .bind(params.case_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateHearingRequest,
) -> Result<Option<Hearing>, AppError> {
    let sql = format!(
        r#"
        UPDATE hearings SET
            hearing_date = COALESCE($2, hearing_date),
            hearing_time = COALESCE($3, hearing_time),
            venue        = COALESCE($4, venue),
            remarks      = COALESCE($5, remarks),
            updated_at   = NOW()
        WHERE id = $1
        RETURNING {HEARING_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Hearing>(&sql)
        .bind(id)
        .bind(req.hearing_date)
        .bind(req.hearing_time)
        .bind(req.venue.as_deref())
        .bind(req.remarks.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM hearings WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
