use shared_types::{
    eq_filter, like_pattern, page_window, AppError, CreateSuretyRequest, Surety, SuretyListParams,
    UpdateSuretyRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const SURETY_COLUMNS: &str = "id, cnic, phone, firstname, lastname, email, address, past_history";

pub async fn create(db: impl PgExecutor<'_>, req: &CreateSuretyRequest) -> Result<Surety, AppError> {
    let sql = format!(
        r#"
        INSERT INTO sureties (cnic, phone, firstname, lastname, email, address, past_history)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {SURETY_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Surety>(&sql)
        .bind(req.cnic.as_deref().map(str::trim))
        .bind(req.phone.as_deref().map(str::trim))
        .bind(req.firstname.as_deref())
        .bind(req.lastname.as_deref())
        .bind(req.email.as_deref())
        .bind(req.address.as_deref())
        .bind(req.past_history.as_deref())
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(db: impl PgExecutor<'_>, id: i64) -> Result<Option<Surety>, AppError> {
    let sql = format!("SELECT {SURETY_COLUMNS} FROM sureties WHERE id = $1");
    sqlx::query_as::<_, Surety>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// `name` matches either first or last name by substring.
pub async fn list(db: impl PgExecutor<'_>, params: &SuretyListParams) -> Result<Vec<Surety>, AppError> {
    let (limit, offset) = page_window(params.limit, params.offset);
    let sql = format!(
        r#"
        SELECT {SURETY_COLUMNS} FROM sureties
        WHERE ($1::TEXT IS NULL OR LOWER(cnic) = $1)
          AND ($2::TEXT IS NULL
               OR LOWER(firstname) LIKE $2 ESCAPE '\'
               OR LOWER(lastname) LIKE $2 ESCAPE '\')
        ORDER BY id
        LIMIT $3 OFFSET $4
        "#
    );
    sqlx::query_as::<_, Surety>(&sql)
        .bind(eq_filter(params.cnic.as_deref()))
        .bind(like_pattern(params.name.as_deref()))
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateSuretyRequest,
) -> Result<Option<Surety>, AppError> {
    let sql = format!(
        r#"
        UPDATE sureties SET
            cnic         = COALESCE($2, cnic),
            phone        = COALESCE($3, phone),
            firstname    = COALESCE($4, firstname),
            lastname     = COALESCE($5, lastname),
            email        = COALESCE($6, email),
            address      = COALESCE($7, address),
            past_history = COALESCE($8, past_history)
        WHERE id = $1
        RETURNING {SURETY_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Surety>(&sql)
        .bind(id)
        .bind(req.cnic.as_deref())
        .bind(req.phone.as_deref())
        .bind(req.firstname.as_deref())
        .bind(req.lastname.as_deref())
        .bind(req.email.as_deref())
        .bind(req.address.as_deref())
        .bind(req.past_history.as_deref())
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Deleting a surety also removes the bails it backs.
pub async fn delete(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM sureties WHERE id = $1")
        .bind(id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected() > 0)
}
