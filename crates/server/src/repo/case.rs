use shared_types::{
    eq_filter, like_pattern, page_window, AppError, Case, CaseAccessResponse, CaseListParams,
    CreateCaseRequest, UpdateCaseRequest,
};
use sqlx::{PgConnection, PgExecutor};

use crate::error_convert::SqlxErrorExt;

const CASE_COLUMNS: &str =
    "id, title, description, casetype, filingdate, status, created_at, updated_at";

pub async fn create(db: impl PgExecutor<'_>, req: &CreateCaseRequest) -> Result<Case, AppError> {
    let sql = format!(
        r#"
        INSERT INTO cases (title, description, casetype, filingdate, status)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {CASE_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Case>(&sql)
        .bind(req.title.as_deref().map(str::trim))
        .bind(req.description.as_deref())
        .bind(req.casetype.as_deref())
        .bind(req.filingdate)
        .bind(req.status.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Case>, AppError> {
    let sql = format!("SELECT {CASE_COLUMNS} FROM cases WHERE id = $1");
    sqlx::query_as::<_, Case>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Exact title match. Titles are not unique; the oldest case wins.
pub async fn find_by_title(db: impl PgExecutor<'_>, title: &str) -> Result<Option<Case>, AppError> {
    let sql = format!("SELECT {CASE_COLUMNS} FROM cases WHERE title = $1 ORDER BY id LIMIT 1");
    sqlx::query_as::<_, Case>(&sql)
        .bind(title)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn exists(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM cases WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Status and case type match exactly, the title by substring. All
/// comparisons ignore case.
pub async fn list(db: impl PgExecutor<'_>, params: &CaseListParams) -> Result<Vec<Case>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {CASE_COLUMNS} FROM cases
        WHERE ($1::TEXT IS NULL OR LOWER(status) = $1)
          AND ($2::TEXT IS NULL OR LOWER(casetype) = $2)
          AND ($3::TEXT IS NULL OR LOWER(title) LIKE $3 ESCAPE '\')
        ORDER BY id
        LIMIT $4 OFFSET $5
        "#
    );
    sqlx::query_as::<_, Case>(&sql)
        .bind(eq_filter(params.status.as_deref()))
        .bind(eq_filter(params.casetype.as_deref()))
        .bind(like_pattern(params.title.as_deref()))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Merge-patch: `None` fields keep their stored value.
pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateCaseRequest,
) -> Result<Option<Case>, AppError> {
    let sql = format!(
        r#"
        UPDATE cases SET
            title       = COALESCE($2, title),
            description = COALESCE($3, description),
            casetype    = COALESCE($4, casetype),
            filingdate  = COALESCE($5, filingdate),
            status      = COALESCE($6, status),
            updated_at  = NOW()
        WHERE id = $1
        RETURNING {CASE_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Case>(&sql)
        .bind(id)
        .bind(req.title.as_deref().map(str::trim))
        .bind(req.description.as_deref())
        .bind(req.casetype.as_deref())
        .bind(req.filingdate)
        .bind(req.status.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Delete a case. Child rows, grants and witness links cascade. Documents
/// linked to no other case are removed first. Witnesses keep their row, and
/// payments keep theirs with `case_id` set to NULL.
pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<bool, AppError> {
    sqlx::query(
        r#"
        DELETE FROM documents d
        USING document_case dc
        WHERE dc.document_id = d.id AND dc.case_id = $1
          AND NOT EXISTS (
              SELECT 1 FROM document_case other
              WHERE other.document_id = d.id AND other.case_id <> $1
          )
        "#,
    )
    .bind(id)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let result = sqlx::query("DELETE FROM cases WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(result.rows_affected() > 0)
}

// -- Access grants ----------------------------------------------------------

pub async fn grant_court(db: impl PgExecutor<'_>, case_id: i64, court_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO court_access (case_id, court_id) VALUES ($1, $2)")
        .bind(case_id)
        .bind(court_id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

pub async fn grant_lawyer(db: impl PgExecutor<'_>, case_id: i64, lawyer_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO case_lawyer_access (case_id, lawyer_id) VALUES ($1, $2)")
        .bind(case_id)
        .bind(lawyer_id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

pub async fn grant_judge(db: impl PgExecutor<'_>, case_id: i64, judge_id: i64) -> Result<(), AppError> {
    sqlx::query("INSERT INTO judge_access (case_id, judge_id) VALUES ($1, $2)")
        .bind(case_id)
        .bind(judge_id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

pub async fn grant_participant(
    db: impl PgExecutor<'_>,
    case_id: i64,
    participant_id: i64,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO case_participant_access (case_id, participant_id) VALUES ($1, $2)")
        .bind(case_id)
        .bind(participant_id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// The court a case is heard in, through `court_access`. A case granted to
/// several courts resolves to the lowest court id.
pub async fn court_for_case(db: impl PgExecutor<'_>, case_id: i64) -> Result<Option<i64>, AppError> {
    sqlx::query_scalar("SELECT court_id FROM court_access WHERE case_id = $1 ORDER BY court_id LIMIT 1")
        .bind(case_id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

async fn grant_ids(conn: &mut PgConnection, sql: &str, case_id: i64) -> Result<Vec<i64>, AppError> {
    sqlx::query_scalar(sql)
        .bind(case_id)
        .fetch_all(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Every actor and court granted access to a case.
pub async fn access(conn: &mut PgConnection, case_id: i64) -> Result<CaseAccessResponse, AppError> {
    Ok(CaseAccessResponse {
        case_id,
        courts: grant_ids(
            conn,
            "SELECT court_id FROM court_access WHERE case_id = $1 ORDER BY court_id",
            case_id,
        )
        .await?,
        lawyers: grant_ids(
            conn,
            "SELECT lawyer_id FROM case_lawyer_access WHERE case_id = $1 ORDER BY lawyer_id",
            case_id,
        )
        .await?,
        judges: grant_ids(
            conn,
            "SELECT judge_id FROM judge_access WHERE case_id = $1 ORDER BY judge_id",
            case_id,
        )
        .await?,
        participants: grant_ids(
            conn,
            "SELECT participant_id FROM case_participant_access WHERE case_id = $1 ORDER BY participant_id",
            case_id,
        )
        .await?,
    })
}
