use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CreateEvidenceRequest, Evidence, MessageResponse, PageParams, UpdateEvidenceRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

/// POST /api/cases/{id}/evidence
#[utoipa::path(
    post,
    path = "/api/cases/{id}/evidence",
    request_body = CreateEvidenceRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 201, description = "Evidence filed", body = Evidence),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "evidence"
)]
pub async fn create_evidence(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Json(body): Json<CreateEvidenceRequest>,
) -> Result<(StatusCode, Json<Evidence>), AppError> {
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    ensure_case(&mut *tx, case_id).await?;
    let evidence = repo::evidence::create(&mut *tx, case_id, &body).await?;
    db::commit(tx).await?;

    Ok((StatusCode::CREATED, Json(evidence)))
}

/// GET /api/cases/{id}/evidence
#[utoipa::path(
    get,
    path = "/api/cases/{id}/evidence",
    params(("id" = i64, Path, description = "Case id"), PageParams),
    responses(
        (status = 200, description = "Evidence for the case", body = Vec<Evidence>),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "evidence"
)]
pub async fn list_case_evidence(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<Evidence>>, AppError> {
    ensure_case(&pool, case_id).await?;
    Ok(Json(repo::evidence::list_for_case(&pool, case_id, &page).await?))
}

/// GET /api/evidence/{id}
#[utoipa::path(
    get,
    path = "/api/evidence/{id}",
    params(("id" = i64, Path, description = "Evidence id")),
    responses(
        (status = 200, description = "Evidence found", body = Evidence),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "evidence"
)]
pub async fn get_evidence(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Evidence>, AppError> {
    repo::evidence::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Evidence {id} not found")))
}

/// PUT /api/evidence/{id}
#[utoipa::path(
    put,
    path = "/api/evidence/{id}",
    request_body = UpdateEvidenceRequest,
    params(("id" = i64, Path, description = "Evidence id")),
    responses(
        (status = 200, description = "Evidence updated", body = Evidence),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "evidence"
)]
pub async fn update_evidence(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateEvidenceRequest>,
) -> Result<Json<Evidence>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let evidence = repo::evidence::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Evidence {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(evidence))
}

/// DELETE /api/evidence/{id}
#[utoipa::path(
    delete,
    path = "/api/evidence/{id}",
    params(("id" = i64, Path, description = "Evidence id")),
    responses(
        (status = 200, description = "Evidence deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "evidence"
)]
pub async fn delete_evidence(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::evidence::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Evidence {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Evidence deleted successfully")))
}
