use shared_types::{page_window, AppError, CreatePaymentRequest, PageParams, PaymentMode, PaymentRecord};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

/// Resolved foreign keys for a new payment.
#[derive(Debug, Clone, Copy)]
pub struct PaymentLinks {
    pub case_id: i64,
    pub court_id: i64,
    pub lawyer_id: i64,
}

const PAYMENT_SELECT: &str = r#"
    SELECT p.id, p.case_id, p.court_id, p.lawyer_id, c.title AS casename, p.purpose,
           p.balance::FLOAT8 AS balance, p.mode, p.paymenttype, p.paymentdate
"#;

/// Insert a payment. `paymentdate` defaults to today.
pub async fn create(
    db: impl PgExecutor<'_>,
    links: PaymentLinks,
    mode: PaymentMode,
    req: &CreatePaymentRequest,
) -> Result<PaymentRecord, AppError> {
    let sql = format!(
        r#"
        WITH inserted AS (
            INSERT INTO payments (mode, lawyer_id, court_id, case_id, paymenttype, balance, purpose, paymentdate)
            VALUES ($1, $2, $3, $4, $5, $6::NUMERIC, $7, COALESCE($8, CURRENT_DATE))
            RETURNING *
        )
        {PAYMENT_SELECT}
        FROM inserted p
        LEFT JOIN cases c ON c.id = p.case_id
        "#
    );
    sqlx::query_as::<_, PaymentRecord>(&sql)
        .bind(mode.as_str())
        .bind(links.lawyer_id)
        .bind(links.court_id)
        .bind(links.case_id)
        .bind(req.paymenttype.as_deref())
        .bind(req.balance)
        .bind(req.purpose.as_deref().map(str::trim))
        .bind(req.paymentdate)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// A lawyer's payments, newest first. Payments whose case was deleted keep
/// their row with a NULL `casename`.
pub async fn list_for_lawyer(
    db: impl PgExecutor<'_>,
    lawyer_id: i64,
    page: &PageParams,
) -> Result<Vec<PaymentRecord>, AppError> {
    let (limit, offset) = page_window(page.limit, page.offset);
    let sql = format!(
        r#"
        {PAYMENT_SELECT}
        FROM payments p
        LEFT JOIN cases c ON c.id = p.case_id
        WHERE p.lawyer_id = $1
        ORDER BY p.paymentdate DESC, p.id DESC
        LIMIT $2 OFFSET $3
        "#
    );
    sqlx::query_as::<_, PaymentRecord>(&sql)
        .bind(lawyer_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
