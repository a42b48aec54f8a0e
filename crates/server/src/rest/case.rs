use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, AssignCaseActorRequest, AssignCaseActorResponse, Case, CaseAccessResponse,
    CaseActorRole, CaseListParams, CreateCaseRequest, LinkCourtRequest, LinkParticipantRequest,
    MessageResponse, UpdateCaseRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::{ensure_case, record_audit};

/// GET /api/cases
#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseListParams),
    responses(
        (status = 200, description = "Matching cases", body = Vec<Case>),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "cases"
)]
pub async fn list_cases(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<CaseListParams>,
) -> Result<Json<Vec<Case>>, AppError> {
    Ok(Json(repo::case::list(&pool, &params).await?))
}

/// POST /api/cases
#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = CreateCaseRequest,
    responses(
        (status = 201, description = "Case created", body = Case),
        (status = 400, description = "Invalid request", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn create_case(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CreateCaseRequest>,
) -> Result<(StatusCode, Json<Case>), AppError> {
    let AuthRequired(claims) = auth;
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    let case = repo::case::create(&mut *tx, &body).await?;
    record_audit(
        &mut tx,
        &claims,
        "create",
        "case",
        &format!("Case {} created: {}", case.id, case.title),
    )
    .await?;
    db::commit(tx).await?;

    tracing::info!(case_id = case.id, "case created");
    Ok((StatusCode::CREATED, Json(case)))
}

/// GET /api/cases/{id}
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case found", body = Case),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn get_case(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Case>, AppError> {
    repo::case::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Case not found"))
}

/// PUT /api/cases/{id}
///
/// Merge-patch: omitted fields keep their stored value.
#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    request_body = UpdateCaseRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case updated", body = Case),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn update_case(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCaseRequest>,
) -> Result<Json<Case>, AppError> {
    let AuthRequired(claims) = auth;
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    let case = repo::case::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found("Case not found"))?;
    record_audit(&mut tx, &claims, "update", "case", &format!("Case {id} updated")).await?;
    db::commit(tx).await?;

    Ok(Json(case))
}

/// DELETE /api/cases/{id}
///
/// Cascades to hearings, bails, evidence, history, appeals, decisions,
/// remands and access grants. Payments survive with no case.
#[utoipa::path(
    delete,
    path = "/api/cases/{id}",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool, auth))]
pub async fn delete_case(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let AuthRequired(claims) = auth;

    let mut tx = db::begin(&pool).await?;
    if !repo::case::delete(&mut tx, id).await? {
        return Err(AppError::not_found("Case not found"));
    }
    record_audit(&mut tx, &claims, "delete", "case", &format!("Case {id} deleted")).await?;
    db::commit(tx).await?;

    tracing::info!(case_id = id, "case deleted");
    Ok(Json(MessageResponse::new("Case deleted successfully")))
}

/// POST /api/cases/{id}/assign
///
/// Grants a lawyer or judge access to the case. `assignee_id` is the
/// profile id for the given role.
#[utoipa::path(
    post,
    path = "/api/cases/{id}/assign",
    request_body = AssignCaseActorRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Assigned", body = AssignCaseActorResponse),
        (status = 400, description = "Invalid role", body = AppError),
        (status = 404, description = "Case or assignee not found", body = AppError),
        (status = 409, description = "Already assigned", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn assign_case_actor(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<AssignCaseActorRequest>,
) -> Result<Json<AssignCaseActorResponse>, AppError> {
    let AuthRequired(claims) = auth;
    let role: CaseActorRole = body.role.parse()?;

    let mut tx = db::begin(&pool).await?;
    ensure_case(&mut *tx, id).await?;
    match role {
        CaseActorRole::Lawyer => {
            if !repo::profile::lawyer_exists(&mut *tx, body.assignee_id).await? {
                return Err(AppError::not_found("Lawyer not found"));
            }
            repo::case::grant_lawyer(&mut *tx, id, body.assignee_id).await?;
        }
        CaseActorRole::Judge => {
            if !repo::profile::judge_exists(&mut *tx, body.assignee_id).await? {
                return Err(AppError::not_found("Judge not found"));
            }
            repo::case::grant_judge(&mut *tx, id, body.assignee_id).await?;
        }
    }
    record_audit(
        &mut tx,
        &claims,
        "assign",
        "case",
        &format!("{} {} assigned to case {id}", role.as_str(), body.assignee_id),
    )
    .await?;
    db::commit(tx).await?;

    Ok(Json(AssignCaseActorResponse {
        message: format!("Case assigned to {} successfully", role.as_str()),
        case_id: id,
        assignee_id: body.assignee_id,
        role,
    }))
}

/// POST /api/cases/{id}/courts
#[utoipa::path(
    post,
    path = "/api/cases/{id}/courts",
    request_body = LinkCourtRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 201, description = "Court granted access", body = MessageResponse),
        (status = 404, description = "Case or court not found", body = AppError),
        (status = 409, description = "Already linked", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn link_court(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<LinkCourtRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let AuthRequired(claims) = auth;

    let mut tx = db::begin(&pool).await?;
    ensure_case(&mut *tx, id).await?;
    if !repo::court::exists(&mut *tx, body.court_id).await? {
        return Err(AppError::not_found("Court not found"));
    }
    repo::case::grant_court(&mut *tx, id, body.court_id).await?;
    record_audit(
        &mut tx,
        &claims,
        "assign",
        "court_access",
        &format!("Court {} granted access to case {id}", body.court_id),
    )
    .await?;
    db::commit(tx).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Court linked to case"))))
}

/// POST /api/cases/{id}/participants
#[utoipa::path(
    post,
    path = "/api/cases/{id}/participants",
    request_body = LinkParticipantRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 201, description = "Participant linked", body = MessageResponse),
        (status = 404, description = "Case or participant not found", body = AppError),
        (status = 409, description = "Already linked", body = AppError)
    ),
    tag = "cases"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn link_participant(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<LinkParticipantRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let AuthRequired(claims) = auth;

    let mut tx = db::begin(&pool).await?;
    ensure_case(&mut *tx, id).await?;
    if !repo::profile::participant_exists(&mut *tx, body.participant_id).await? {
        return Err(AppError::not_found("Case participant not found"));
    }
    repo::case::grant_participant(&mut *tx, id, body.participant_id).await?;
    record_audit(
        &mut tx,
        &claims,
        "assign",
        "case_participant_access",
        &format!("Participant {} linked to case {id}", body.participant_id),
    )
    .await?;
    db::commit(tx).await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::new("Participant linked to case"))))
}

/// GET /api/cases/{id}/access
#[utoipa::path(
    get,
    path = "/api/cases/{id}/access",
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 200, description = "Access grants", body = CaseAccessResponse),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "cases"
)]
pub async fn get_case_access(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<CaseAccessResponse>, AppError> {
    let mut conn = pool
        .acquire()
        .await
        .map_err(crate::error_convert::SqlxErrorExt::into_app_error)?;
    ensure_case(&mut *conn, id).await?;
    Ok(Json(repo::case::access(&mut conn, id).await?))
}
