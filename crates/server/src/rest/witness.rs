//! Witnesses are created through a case. The witness row and its
//! `witness_case` link are written in one transaction, so a failure on
//! either leaves nothing behind.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CaseWitness, CreateCaseWitnessRequest, MessageResponse, PageParams,
    UpdateWitnessRequest, Witness,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

/// POST /api/cases/{id}/witnesses
#[utoipa::path(
    post,
    path = "/api/cases/{id}/witnesses",
    request_body = CreateCaseWitnessRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 201, description = "Witness created and linked", body = CaseWitness),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "witnesses"
)]
#[tracing::instrument(skip(pool, _auth, body))]
pub async fn create_case_witness(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Json(body): Json<CreateCaseWitnessRequest>,
) -> Result<(StatusCode, Json<CaseWitness>), AppError> {
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    ensure_case(&mut *tx, case_id).await?;
    let witness = repo::witness::create_for_case(&mut tx, case_id, &body).await?;
    db::commit(tx).await?;

    tracing::info!(case_id, witness_id = witness.id, "witness linked to case");
    Ok((StatusCode::CREATED, Json(witness)))
}

/// GET /api/cases/{id}/witnesses
#[utoipa::path(
    get,
    path = "/api/cases/{id}/witnesses",
    params(("id" = i64, Path, description = "Case id"), PageParams),
    responses(
        (status = 200, description = "Witnesses with their statements", body = Vec<CaseWitness>),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "witnesses"
)]
pub async fn list_case_witnesses(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<CaseWitness>>, AppError> {
    ensure_case(&pool, case_id).await?;
    Ok(Json(repo::witness::list_for_case(&pool, case_id, &page).await?))
}

/// GET /api/witnesses/{id}
#[utoipa::path(
    get,
    path = "/api/witnesses/{id}",
    params(("id" = i64, Path, description = "Witness id")),
    responses(
        (status = 200, description = "Witness found", body = Witness),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "witnesses"
)]
pub async fn get_witness(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Witness>, AppError> {
    repo::witness::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Witness {id} not found")))
}

/// PUT /api/witnesses/{id}
#[utoipa::path(
    put,
    path = "/api/witnesses/{id}",
    request_body = UpdateWitnessRequest,
    params(("id" = i64, Path, description = "Witness id")),
    responses(
        (status = 200, description = "Witness updated", body = Witness),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "witnesses"
)]
pub async fn update_witness(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateWitnessRequest>,
) -> Result<Json<Witness>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let witness = repo::witness::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Witness {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(witness))
}

/// DELETE /api/witnesses/{id}
#[utoipa::path(
    delete,
    path = "/api/witnesses/{id}",
    params(("id" = i64, Path, description = "Witness id")),
    responses(
        (status = 200, description = "Witness deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "witnesses"
)]
pub async fn delete_witness(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::witness::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Witness {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Witness deleted successfully")))
}
