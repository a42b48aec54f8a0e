use shared_types::{
    page_window, AppError, CaseChildListParams, CreateDecisionRequest, FinalDecision,
    UpdateDecisionRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const DECISION_COLUMNS: &str =
    "id, case_id, decision_date, summary, verdict, created_at, updated_at";

pub async fn create(
    db: impl PgExecutor<'_>,
    req: &CreateDecisionRequest,
) -> Result<FinalDecision, AppError> {
    let sql = format!(
        r#"
        INSERT INTO final_decisions (case_id, verdict, decision_date, summary)
        VALUES ($1, $2, COALESCE($3, CURRENT_DATE), $4)
        RETURNING {DECISION_COLUMNS}
        "#
    );
    sqlx::query_as::<_, FinalDecision>(&sql)
        .bind(req.case_id)
        .bind(req.verdict.as_deref().map(str::trim))
        .bind(req.decision_date)
        .bind(req.summary.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<FinalDecision>, AppError> {
    let sql = format!("SELECT {DECISION_COLUMNS} FROM final_decisions WHERE id = $1");
    sqlx::query_as::<_, FinalDecision>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list(
    db: impl PgExecutor<'_>,
    params: &CaseChildListParams,
) -> Result<Vec<FinalDecision>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {DECISION_COLUMNS} FROM final_decisions
        WHERE ($1::BIGINT IS NULL OR case_id = $1)
        ORDER BY id
        LIMIT $2 OFFSET $3
        "#
    );
    sqlx::query_as::<_, FinalDecision>(&sql)
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
    req: &UpdateDecisionRequest,
) -> Result<Option<FinalDecision>, AppError> {
    let sql = format!(
        r#"
        UPDATE final_decisions SET
            verdict       = COALESCE($2, verdict),
            decision_date = COALESCE($3, decision_date),
            summary       = COALESCE($4, summary),
            updated_at    = NOW()
        WHERE id = $1
        RETURNING {DECISION_COLUMNS}
        "#
    );
    sqlx::query_as::<_, FinalDecision>(&sql)
        .bind(id)
        .bind(req.verdict.as_deref())
        .bind(req.decision_date)
        .bind(req.summary.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM final_decisions WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
