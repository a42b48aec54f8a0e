use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CreateHearingRequest, Hearing, HearingListParams, MessageResponse,
    UpdateHearingRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

/// POST /api/hearings
#[utoipa::path(
    post,
    path = "/api/hearings",
    request_body = CreateHearingRequest,
    responses(
        (status = 201, description = "Hearing scheduled", body = Hearing),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "hearings"
)]
pub async fn create_hearing(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateHearingRequest>,
) -> Result<(StatusCode, Json<Hearing>), AppError> {
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    if let Some(case_id) = body.case_id {
        ensure_case(&mut *tx, case_id).await?;
    }
    let hearing = repo::hearing::create(&mut *tx, &body).await?;
    db::commit(tx).await?;

    Ok((StatusCode::CREATED, Json(hearing)))
}

/// GET /api/hearings
#[utoipa::path(
    get,
    path = "/api/hearings",
    params(HearingListParams),
    responses((status = 200, description = "Hearings ordered by date", body = Vec<Hearing>)),
    tag = "hearings"
)]
pub async fn list_hearings(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<HearingListParams>,
) -> Result<Json<Vec<Hearing>>, AppError> {
    Ok(Json(repo::hearing::list(&pool, &params).await?))
}

/// GET /api/hearings/{id}
#[utoipa::path(
    get,
    path = "/api/hearings/{id}",
    params(("id" = i64, Path, description = "Hearing id")),
    responses(
        (status = 200, description = "Hearing found", body = Hearing),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "hearings"
)]
pub async fn get_hearing(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Hearing>, AppError> {
    repo::hearing::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Hearing {id} not found")))
}

/// PUT /api/hearings/{id}
#[utoipa::path(
    put,
    path = "/api/hearings/{id}",
    request_body = UpdateHearingRequest,
    params(("id" = i64, Path, description = "Hearing id")),
    responses(
        (status = 200, description = "Hearing updated", body = Hearing),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "hearings"
)]
pub async fn update_hearing(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateHearingRequest>,
) -> Result<Json<Hearing>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let hearing = repo::hearing::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Hearing {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(hearing))
}

/// DELETE /api/hearings/{id}
#[utoipa::path(
    delete,
    path = "/api/hearings/{id}",
    params(("id" = i64, Path, description = "Hearing id")),
    responses(
        (status = 200, description = "Hearing deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "hearings"
)]
pub async fn delete_hearing(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::hearing::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Hearing {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Hearing deleted successfully")))
}
