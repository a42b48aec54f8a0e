//! Bail records and the sureties standing behind them.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, Bail, BailListParams, CreateBailRequest, CreateSuretyRequest, MessageResponse,
    Surety, SuretyListParams, UpdateBailRequest, UpdateSuretyRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

// ── Bail ───────────────────────────────────────────────────────────

/// POST /api/bails
#[utoipa::path(
    post,
    path = "/api/bails",
    request_body = CreateBailRequest,
    responses(
        (status = 201, description = "Bail recorded", body = Bail),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case or surety not found", body = AppError)
    ),
    tag = "bail"
)]
pub async fn create_bail(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateBailRequest>,
) -> Result<(StatusCode, Json<Bail>), AppError> {
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    if let Some(case_id) = body.case_id {
        ensure_case(&mut *tx, case_id).await?;
    }
    if let Some(surety_id) = body.surety_id {
        if repo::surety::find_by_id(&mut *tx, surety_id).await?.is_none() {
            return Err(AppError::not_found(format!("Surety {surety_id} not found")));
        }
    }
    let bail = repo::bail::create(&mut *tx, &body).await?;
    db::commit(tx).await?;

    Ok((StatusCode::CREATED, Json(bail)))
}

/// GET /api/bails
#[utoipa::path(
    get,
    path = "/api/bails",
    params(BailListParams),
    responses((status = 200, description = "Bail records", body = Vec<Bail>)),
    tag = "bail"
)]
pub async fn list_bails(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<BailListParams>,
) -> Result<Json<Vec<Bail>>, AppError> {
    Ok(Json(repo::bail::list(&pool, &params).await?))
}

/// GET /api/bails/{id}
#[utoipa::path(
    get,
    path = "/api/bails/{id}",
    params(("id" = i64, Path, description = "Bail id")),
    responses(
        (status = 200, description = "Bail found", body = Bail),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bail"
)]
pub async fn get_bail(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Bail>, AppError> {
    repo::bail::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Bail {id} not found")))
}

/// PUT /api/bails/{id}
#[utoipa::path(
    put,
    path = "/api/bails/{id}",
    request_body = UpdateBailRequest,
    params(("id" = i64, Path, description = "Bail id")),
    responses(
        (status = 200, description = "Bail updated", body = Bail),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bail"
)]
pub async fn update_bail(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateBailRequest>,
) -> Result<Json<Bail>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let bail = repo::bail::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Bail {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(bail))
}

/// DELETE /api/bails/{id}
#[utoipa::path(
    delete,
    path = "/api/bails/{id}",
    params(("id" = i64, Path, description = "Bail id")),
    responses(
        (status = 200, description = "Bail deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bail"
)]
pub async fn delete_bail(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::bail::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Bail {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Bail deleted successfully")))
}

// ── Surety ─────────────────────────────────────────────────────────

/// POST /api/surety
#[utoipa::path(
    post,
    path = "/api/surety",
    request_body = CreateSuretyRequest,
    responses(
        (status = 201, description = "Surety created", body = Surety),
        (status = 400, description = "Invalid request", body = AppError)
    ),
    tag = "bail"
)]
pub async fn create_surety(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateSuretyRequest>,
) -> Result<(StatusCode, Json<Surety>), AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let surety = repo::surety::create(&mut *tx, &body).await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(surety)))
}

/// GET /api/surety
#[utoipa::path(
    get,
    path = "/api/surety",
    params(SuretyListParams),
    responses((status = 200, description = "Sureties", body = Vec<Surety>)),
    tag = "bail"
)]
pub async fn list_sureties(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<SuretyListParams>,
) -> Result<Json<Vec<Surety>>, AppError> {
    Ok(Json(repo::surety::list(&pool, &params).await?))
}

/// GET /api/surety/{id}
#[utoipa::path(
    get,
    path = "/api/surety/{id}",
    params(("id" = i64, Path, description = "Surety id")),
    responses(
        (status = 200, description = "Surety found", body = Surety),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bail"
)]
pub async fn get_surety(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Surety>, AppError> {
    repo::surety::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Surety {id} not found")))
}

/// PUT /api/surety/{id}
#[utoipa::path(
    put,
    path = "/api/surety/{id}",
    request_body = UpdateSuretyRequest,
    params(("id" = i64, Path, description = "Surety id")),
    responses(
        (status = 200, description = "Surety updated", body = Surety),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bail"
)]
pub async fn update_surety(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateSuretyRequest>,
) -> Result<Json<Surety>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let surety = repo::surety::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Surety {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(surety))
}

/// DELETE /api/surety/{id}
///
/// Bails backed by this surety are removed with it.
#[utoipa::path(
    delete,
    path = "/api/surety/{id}",
    params(("id" = i64, Path, description = "Surety id")),
    responses(
        (status = 200, description = "Surety deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "bail"
)]
pub async fn delete_surety(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::surety::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Surety {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Surety deleted successfully")))
}
