use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{AppError, CaseRef, CreatePaymentRequest, PageParams, PaymentRecord};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo::{self, payment::PaymentLinks};

/// POST /api/payments
///
/// Records a payment made by the signed-in lawyer. The case is named by
/// `case_id` or by its exact title in `casename`, and the court is the one
/// holding access to that case.
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = PaymentRecord),
        (status = 400, description = "Invalid request or payment mode", body = AppError),
        (status = 404, description = "Lawyer, case or court access not found", body = AppError)
    ),
    tag = "payments"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn create_payment(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<PaymentRecord>), AppError> {
    let AuthRequired(claims) = auth;
    body.validate_request()?;
    let case_ref = body.case_ref()?;
    let mode = body.payment_mode()?;

    let mut tx = db::begin(&pool).await?;

    let lawyer = repo::profile::lawyer_for_user(&mut *tx, claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("Lawyer not found"))?;

    let case = match &case_ref {
        CaseRef::Id(id) => repo::case::find_by_id(&mut *tx, *id).await?,
        CaseRef::Title(title) => repo::case::find_by_title(&mut *tx, title).await?,
    }
    .ok_or_else(|| AppError::not_found("Case not found"))?;

    let court_id = repo::case::court_for_case(&mut *tx, case.id)
        .await?
        .ok_or_else(|| AppError::not_found("Court access entry not found"))?;

    let links = PaymentLinks {
        case_id: case.id,
        court_id,
        lawyer_id: lawyer.id,
    };
    let payment = repo::payment::create(&mut *tx, links, mode, &body).await?;
    db::commit(tx).await?;

    tracing::info!(
        payment_id = payment.id,
        case_id = case.id,
        lawyer_id = lawyer.id,
        mode = %mode,
        "payment recorded"
    );
    Ok((StatusCode::CREATED, Json(payment)))
}

/// GET /api/payments
#[utoipa::path(
    get,
    path = "/api/payments",
    params(PageParams),
    responses(
        (status = 200, description = "The caller's payments, newest first", body = Vec<PaymentRecord>),
        (status = 404, description = "Lawyer not found", body = AppError)
    ),
    tag = "payments"
)]
pub async fn list_payments(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<PaymentRecord>>, AppError> {
    let lawyer = repo::profile::lawyer_for_user(&pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("Lawyer not found"))?;
    Ok(Json(repo::payment::list_for_lawyer(&pool, lawyer.id, &page).await?))
}
