use shared_types::{
    page_window, AppError, CaseDocument, CreateCaseDocumentRequest, Document, PageParams,
    UpdateDocumentRequest,
};
use sqlx::{PgConnection, PgExecutor};

use crate::error_convert::SqlxErrorExt;

const DOCUMENT_COLUMNS: &str =
    "id, document_type, document_title, upload_date, file_path, created_at, updated_at";

const CASE_DOCUMENT_SELECT: &str = r#"
    SELECT d.id, dc.case_id, d.document_type, d.document_title, d.upload_date, d.file_path,
           dc.submission_date, d.created_at, d.updated_at
    FROM document_case dc
    JOIN documents d ON d.id = dc.document_id
"#;

/// Create a document and attach it to the case on the caller's transaction.
/// `submission_date` defaults to today.
pub async fn create_for_case(
    conn: &mut PgConnection,
    case_id: i64,
    req: &CreateCaseDocumentRequest,
) -> Result<CaseDocument, AppError> {
    let document_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO documents (document_type, document_title, upload_date, file_path)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(req.document_type.as_deref())
    .bind(req.document_title.as_deref().map(str::trim))
    .bind(req.upload_date)
    .bind(req.file_path.as_deref())
    .fetch_one(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    sqlx::query(
        r#"
        INSERT INTO document_case (case_id, document_id, submission_date)
        VALUES ($1, $2, COALESCE($3, CURRENT_DATE))
        "#,
    )
    .bind(case_id)
    .bind(document_id)
    .bind(req.submission_date)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let sql = format!("{CASE_DOCUMENT_SELECT} WHERE dc.case_id = $1 AND dc.document_id = $2");
    sqlx::query_as::<_, CaseDocument>(&sql)
        .bind(case_id)
        .bind(document_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list_for_case(
    db: impl PgExecutor<'_>,
    case_id: i64,
    page: &PageParams,
) -> Result<Vec<CaseDocument>, AppError> {
    let (limit, offset) = page_window(page.limit, page.offset);
    let sql = format!(
        "{CASE_DOCUMENT_SELECT} WHERE dc.case_id = $1 ORDER BY dc.submission_date, d.id LIMIT $2 OFFSET $3"
    );
    sqlx::query_as::<_, CaseDocument>(&sql)
        .bind(case_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Document>, AppError> {
    let sql = format!("SELECT {DOCUMENT_COLUMNS} FROM documents WHERE id = $1");
    sqlx::query_as::<_, Document>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateDocumentRequest,
) -> Result<Option<Document>, AppError> {
    let sql = format!(
        r#"
        UPDATE documents SET
            document_title = COALESCE($2, document_title),
            document_type  = COALESCE($3, document_type),
            upload_date    = COALESCE($4, upload_date),
            file_path      = COALESCE($5, file_path),
            updated_at     = NOW()
        WHERE id = $1
        RETURNING {DOCUMENT_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Document>(&sql)
        .bind(id)
        .bind(req.document_title.as_deref())
        .bind(req.document_type.as_deref())
        .bind(req.upload_date)
        .bind(req.file_path.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM documents WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
