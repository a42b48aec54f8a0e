use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, Appeal, AppealListParams, CreateAppealRequest, MessageResponse, UpdateAppealRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

/// POST /api/appeals
#[utoipa::path(
    post,
    path = "/api/appeals",
    request_body = CreateAppealRequest,
    responses(
        (status = 201, description = "Appeal filed", body = Appeal),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "appeals"
)]
pub async fn create_appeal(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateAppealRequest>,
) -> Result<(StatusCode, Json<Appeal>), AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    if let Some(case_id) = body.case_id {
        ensure_case(&mut *tx, case_id).await?;
    }
    let appeal = repo::appeal::create(&mut *tx, &body).await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(appeal)))
}

/// GET /api/appeals
#[utoipa::path(
    get,
    path = "/api/appeals",
    params(AppealListParams),
    responses((status = 200, description = "Appeals", body = Vec<Appeal>)),
    tag = "appeals"
)]
pub async fn list_appeals(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<AppealListParams>,
) -> Result<Json<Vec<Appeal>>, AppError> {
    Ok(Json(repo::appeal::list(&pool, &params).await?))
}

/// GET /api/appeals/{id}
#[utoipa::path(
    get,
    path = "/api/appeals/{id}",
    params(("id" = i64, Path, description = "Appeal id")),
    responses(
        (status = 200, description = "Appeal found", body = Appeal),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "appeals"
)]
pub async fn get_appeal(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Appeal>, AppError> {
    repo::appeal::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Appeal {id} not found")))
}

/// PUT /api/appeals/{id}
#[utoipa::path(
    put,
    path = "/api/appeals/{id}",
    request_body = UpdateAppealRequest,
    params(("id" = i64, Path, description = "Appeal id")),
    responses(
        (status = 200, description = "Appeal updated", body = Appeal),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "appeals"
)]
pub async fn update_appeal(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateAppealRequest>,
) -> Result<Json<Appeal>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let appeal = repo::appeal::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Appeal {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(appeal))
}

/// DELETE /api/appeals/{id}
#[utoipa::path(
    delete,
    path = "/api/appeals/{id}",
    params(("id" = i64, Path, description = "Appeal id")),
    responses(
        (status = 200, description = "Appeal deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "appeals"
)]
pub async fn delete_appeal(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::appeal::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Appeal {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Appeal deleted successfully")))
}
