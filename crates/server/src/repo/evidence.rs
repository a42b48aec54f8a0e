use shared_types::{
    page_window, AppError, CreateEvidenceRequest, Evidence, PageParams, UpdateEvidenceRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const EVIDENCE_COLUMNS: &str =
    "id, case_id, evidence_type, description, submitted_date, file_path, created_at, updated_at";

pub async fn create(
    db: impl PgExecutor<'_>,
    case_id: i64,
    req: &CreateEvidenceRequest,
) -> Result<Evidence, AppError> {
    let sql = format!(
        r#"
        INSERT INTO evidence (case_id, evidence_type, description, submitted_date, file_path)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {EVIDENCE_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Evidence>(&sql)
        .bind(case_id)
        .bind(req.evidence_type.as_deref().map(str::trim))
        .bind(req.description.as_deref())
        .bind(req.submitted_date)
        .bind(req.file_path.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Evidence>, AppError> {
    let sql = format!("SELECT {EVIDENCE_COLUMNS} FROM evidence WHERE id = $1");
    sqlx::query_as::<_, Evidence>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list_for_case(
    db: impl PgExecutor<'_>,
    case_id: i64,
    page: &PageParams,
) -> Result<Vec<Evidence>, AppError> {
    let (limit, offset) = page_window(page.limit, page.offset);
    let sql = format!(
        "SELECT {EVIDENCE_COLUMNS} FROM evidence WHERE case_id = $1 ORDER BY id LIMIT $2 OFFSET $3"
    );
    sqlx::query_as::<_, Evidence>(&sql)
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
    req: &UpdateEvidenceRequest,
) -> Result<Option<Evidence>, AppError> {
    let sql = format!(
        r#"
        UPDATE evidence SET
            evidence_type  = COALESCE($2, evidence_type),
            description    = COALESCE($3, description),
            submitted_date = COALESCE($4, submitted_date),
            file_path      = COALESCE($5, file_path),
            updated_at     = NOW()
        WHERE id = $1
        RETURNING {EVIDENCE_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Evidence>(&sql)
        .bind(id)
        .bind(req.evidence_type.as_deref())
        .bind(req.description.as_deref())
        .bind(req.submitted_date)
        .bind(req.file_path.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM evidence WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
