use shared_types::{
    page_window, AppError, CaseWitness, CreateCaseWitnessRequest, PageParams, UpdateWitnessRequest,
    Witness,
};
use sqlx::{PgConnection, PgExecutor};

use crate::error_convert::SqlxErrorExt;

const WITNESS_COLUMNS: &str = "id, firstname, lastname, cnic, phone, email, address, past_history";

const CASE_WITNESS_SELECT: &str = r#"
    SELECT w.id, wc.case_id, w.firstname, w.lastname, w.cnic, w.phone, w.email,
           w.address, w.past_history, wc.statement, wc.statement_date
    FROM witness_case wc
    JOIN witnesses w ON w.id = wc.witness_id
"#;

/// Create a witness and link it to the case. Both inserts run on the
/// caller's transaction.
pub async fn create_for_case(
    conn: &mut PgConnection,
    case_id: i64,
    req: &CreateCaseWitnessRequest,
) -> Result<CaseWitness, AppError> {
    let witness_id: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO witnesses (firstname, lastname, cnic, phone, email, address, past_history)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id
        "#,
    )
    .bind(req.firstname.as_deref().map(str::trim))
    .bind(req.lastname.as_deref().map(str::trim))
    .bind(req.cnic.as_deref().map(str::trim))
    .bind(req.phone.as_deref())
    .bind(req.email.as_deref())
    .bind(req.address.as_deref())
    .bind(req.past_history.as_deref())
    .fetch_one(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    sqlx::query(
        "INSERT INTO witness_case (case_id, witness_id, statement, statement_date) VALUES ($1, $2, $3, $4)",
    )
    .bind(case_id)
    .bind(witness_id)
    .bind(req.statement.as_deref())
    .bind(req.statement_date)
    .execute(&mut *conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;

    let sql = format!("{CASE_WITNESS_SELECT} WHERE wc.case_id = $1 AND wc.witness_id = $2");
    sqlx::query_as::<_, CaseWitness>(&sql)
        .bind(case_id)
        .bind(witness_id)
        .fetch_one(&mut *conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn list_for_case(
    db: impl PgExecutor<'_>,
    case_id: i64,
    page: &PageParams,
) -> Result<Vec<CaseWitness>, AppError> {
    let (limit, offset) = page_window(page.limit, page.offset);
    let sql = format!("{CASE_WITNESS_SELECT} WHERE wc.case_id = $1 ORDER BY w.id LIMIT $2 OFFSET $3");
    sqlx::query_as::<_, CaseWitness>(&sql)
        .bind(case_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Witness>, AppError> {
    let sql = format!("SELECT {WITNESS_COLUMNS} FROM witnesses WHERE id = $1");
    sqlx::query_as::<_, Witness>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateWitnessRequest,
) -> Result<Option<Witness>, AppError> {
    let sql = format!(
        r#"
        UPDATE witnesses SET
            firstname    = COALESCE($2, firstname),
            lastname     = COALESCE($3, lastname),
            cnic         = COALESCE($4, cnic),
            phone        = COALESCE($5, phone),
            email        = COALESCE($6, email),
            address      = COALESCE($7, address),
            past_history = COALESCE($8, past_history)
        WHERE id = $1
        RETURNING {WITNESS_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Witness>(&sql)
        .bind(id)
        .bind(req.firstname.as_deref())
        .bind(req.lastname.as_deref())
        .bind(req.cnic.as_deref())
        .bind(req.phone.as_deref())
        .bind(req.email.as_deref())
        .bind(req.address.as_deref())
        .bind(req.past_history.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Removes the witness and, by cascade, every case link.
pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM witnesses WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
