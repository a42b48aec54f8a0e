//! Final decisions and custody remands.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CaseChildListParams, CreateDecisionRequest, CreateRemandRequest, FinalDecision,
    MessageResponse, Remand, UpdateDecisionRequest, UpdateRemandRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

// ── Final decisions ────────────────────────────────────────────────

/// POST /api/decisions
#[utoipa::path(
    post,
    path = "/api/decisions",
    request_body = CreateDecisionRequest,
    responses(
        (status = 201, description = "Decision recorded", body = FinalDecision),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn create_decision(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateDecisionRequest>,
) -> Result<(StatusCode, Json<FinalDecision>), AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    if let Some(case_id) = body.case_id {
        ensure_case(&mut *tx, case_id).await?;
    }
    let decision = repo::decision::create(&mut *tx, &body).await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(decision)))
}

/// GET /api/decisions
#[utoipa::path(
    get,
    path = "/api/decisions",
    params(CaseChildListParams),
    responses((status = 200, description = "Decisions", body = Vec<FinalDecision>)),
    tag = "decisions"
)]
pub async fn list_decisions(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<CaseChildListParams>,
) -> Result<Json<Vec<FinalDecision>>, AppError> {
    Ok(Json(repo::decision::list(&pool, &params).await?))
}

/// GET /api/decisions/{id}
#[utoipa::path(
    get,
    path = "/api/decisions/{id}",
    params(("id" = i64, Path, description = "Decision id")),
    responses(
        (status = 200, description = "Decision found", body = FinalDecision),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn get_decision(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<FinalDecision>, AppError> {
    repo::decision::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Decision {id} not found")))
}

/// PUT /api/decisions/{id}
#[utoipa::path(
    put,
    path = "/api/decisions/{id}",
    request_body = UpdateDecisionRequest,
    params(("id" = i64, Path, description = "Decision id")),
    responses(
        (status = 200, description = "Decision updated", body = FinalDecision),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn update_decision(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateDecisionRequest>,
) -> Result<Json<FinalDecision>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let decision = repo::decision::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Decision {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(decision))
}

/// DELETE /api/decisions/{id}
#[utoipa::path(
    delete,
    path = "/api/decisions/{id}",
    params(("id" = i64, Path, description = "Decision id")),
    responses(
        (status = 200, description = "Decision deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn delete_decision(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::decision::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Decision {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Decision deleted successfully")))
}

// ── Remands ────────────────────────────────────────────────────────

/// POST /api/remands
#[utoipa::path(
    post,
    path = "/api/remands",
    request_body = CreateRemandRequest,
    responses(
        (status = 201, description = "Remand recorded", body = Remand),
        (status = 400, description = "Missing fields or end before start", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn create_remand(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateRemandRequest>,
) -> Result<(StatusCode, Json<Remand>), AppError> {
    body.validate_request()?;
    body.check_window()?;

    let mut tx = db::begin(&pool).await?;
    if let Some(case_id) = body.case_id {
        ensure_case(&mut *tx, case_id).await?;
    }
    let remand = repo::remand::create(&mut *tx, &body).await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(remand)))
}

/// GET /api/remands
#[utoipa::path(
    get,
    path = "/api/remands",
    params(CaseChildListParams),
    responses((status = 200, description = "Remands", body = Vec<Remand>)),
    tag = "decisions"
)]
pub async fn list_remands(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<CaseChildListParams>,
) -> Result<Json<Vec<Remand>>, AppError> {
    Ok(Json(repo::remand::list(&pool, &params).await?))
}

/// GET /api/remands/{id}
#[utoipa::path(
    get,
    path = "/api/remands/{id}",
    params(("id" = i64, Path, description = "Remand id")),
    responses(
        (status = 200, description = "Remand found", body = Remand),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn get_remand(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Remand>, AppError> {
    repo::remand::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Remand {id} not found")))
}

/// PUT /api/remands/{id}
///
/// A patch that moves only one end of the window is checked by the
/// `remands_window_check` constraint and surfaces as a 400.
#[utoipa::path(
    put,
    path = "/api/remands/{id}",
    request_body = UpdateRemandRequest,
    params(("id" = i64, Path, description = "Remand id")),
    responses(
        (status = 200, description = "Remand updated", body = Remand),
        (status = 400, description = "End before start", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn update_remand(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateRemandRequest>,
) -> Result<Json<Remand>, AppError> {
    body.validate_request()?;
    body.check_window()?;
    let mut tx = db::begin(&pool).await?;
    let remand = repo::remand::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Remand {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(remand))
}

/// DELETE /api/remands/{id}
#[utoipa::path(
    delete,
    path = "/api/remands/{id}",
    params(("id" = i64, Path, description = "Remand id")),
    responses(
        (status = 200, description = "Remand deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "decisions"
)]
pub async fn delete_remand(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::remand::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Remand {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Remand deleted successfully")))
}
