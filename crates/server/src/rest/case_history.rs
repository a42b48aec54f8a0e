use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CaseHistory, CreateCaseHistoryRequest, MessageResponse, PageParams,
    UpdateCaseHistoryRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

/// POST /api/cases/{id}/history
#[utoipa::path(
    post,
    path = "/api/cases/{id}/history",
    request_body = CreateCaseHistoryRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 201, description = "History entry added", body = CaseHistory),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "case-history"
)]
pub async fn create_case_history(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Json(body): Json<CreateCaseHistoryRequest>,
) -> Result<(StatusCode, Json<CaseHistory>), AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    ensure_case(&mut *tx, case_id).await?;
    let entry = repo::case_history::create(&mut *tx, case_id, &body).await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/cases/{id}/history
#[utoipa::path(
    get,
    path = "/api/cases/{id}/history",
    params(("id" = i64, Path, description = "Case id"), PageParams),
    responses(
        (status = 200, description = "History in action date order", body = Vec<CaseHistory>),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "case-history"
)]
pub async fn list_case_history(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<CaseHistory>>, AppError> {
    ensure_case(&pool, case_id).await?;
    Ok(Json(repo::case_history::list_for_case(&pool, case_id, &page).await?))
}

/// GET /api/case-history/{id}
#[utoipa::path(
    get,
    path = "/api/case-history/{id}",
    params(("id" = i64, Path, description = "History entry id")),
    responses(
        (status = 200, description = "History entry", body = CaseHistory),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-history"
)]
pub async fn get_case_history(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<CaseHistory>, AppError> {
    repo::case_history::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("History entry {id} not found")))
}

/// PUT /api/case-history/{id}
#[utoipa::path(
    put,
    path = "/api/case-history/{id}",
    request_body = UpdateCaseHistoryRequest,
    params(("id" = i64, Path, description = "History entry id")),
    responses(
        (status = 200, description = "History entry updated", body = CaseHistory),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-history"
)]
pub async fn update_case_history(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCaseHistoryRequest>,
) -> Result<Json<CaseHistory>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let entry = repo::case_history::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("History entry {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(entry))
}

/// DELETE /api/case-history/{id}
#[utoipa::path(
    delete,
    path = "/api/case-history/{id}",
    params(("id" = i64, Path, description = "History entry id")),
    responses(
        (status = 200, description = "History entry deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "case-history"
)]
pub async fn delete_case_history(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::case_history::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("History entry {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("History entry deleted successfully")))
}
