use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, AssignJudgeToCourtRequest, AssignProsecutorRequest, Court, CourtListParams,
    Courtroom, CourtroomListParams, CreateCourtRequest, CreateCourtroomRequest,
    CreateProsecutorRequest, MessageResponse, PageParams, Prosecutor, Role, UpdateCourtRequest,
    UpdateCourtroomRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::record_audit;

/// POST /api/court
///
/// A court registrar creating a court becomes that court's registrar in the
/// same transaction.
#[utoipa::path(
    post,
    path = "/api/court",
    request_body = CreateCourtRequest,
    responses(
        (status = 201, description = "Court created", body = Court),
        (status = 400, description = "Missing fields", body = AppError),
        (status = 404, description = "CourtRegistrar profile not found", body = AppError)
    ),
    tag = "courts"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn create_court(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CreateCourtRequest>,
) -> Result<(StatusCode, Json<Court>), AppError> {
    let AuthRequired(claims) = auth;
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    let court = repo::court::create(&mut *tx, &body).await?;
    if claims.role == Role::CourtRegistrar {
        let registrar = repo::profile::registrar_for_user(&mut *tx, claims.sub)
            .await?
            .ok_or_else(|| AppError::not_found("CourtRegistrar profile not found"))?;
        repo::profile::set_registrar_court(&mut *tx, registrar.id, court.id).await?;
        tracing::info!(registrar_id = registrar.id, court_id = court.id, "registrar linked to court");
    }
    db::commit(tx).await?;

    Ok((StatusCode::CREATED, Json(court)))
}

/// GET /api/court
///
/// The court the signed-in registrar works for.
#[utoipa::path(
    get,
    path = "/api/court",
    responses(
        (status = 200, description = "Registrar's court", body = Court),
        (status = 404, description = "No registrar profile or court", body = AppError)
    ),
    tag = "courts"
)]
pub async fn get_registrar_court(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<Court>, AppError> {
    let registrar = repo::profile::registrar_for_user(&pool, claims.sub)
        .await?
        .ok_or_else(|| AppError::not_found("CourtRegistrar profile not found"))?;
    let court_id = registrar
        .court_id
        .ok_or_else(|| AppError::not_found("Registrar is not assigned to any court"))?;
    let court = repo::court::find_by_id(&pool, court_id)
        .await?
        .ok_or_else(|| AppError::not_found("Court not found"))?;
    Ok(Json(court))
}

/// GET /api/courts
#[utoipa::path(
    get,
    path = "/api/courts",
    params(CourtListParams),
    responses(
        (status = 200, description = "Matching courts", body = Vec<Court>)
    ),
    tag = "courts"
)]
pub async fn list_courts(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<CourtListParams>,
) -> Result<Json<Vec<Court>>, AppError> {
    Ok(Json(repo::court::list(&pool, &params).await?))
}

/// GET /api/courts/{id}
#[utoipa::path(
    get,
    path = "/api/courts/{id}",
    params(("id" = i64, Path, description = "Court id")),
    responses(
        (status = 200, description = "Court found", body = Court),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "courts"
)]
pub async fn get_court(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Court>, AppError> {
    repo::court::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Court {id} not found")))
}

/// PUT /api/courts/{id}
#[utoipa::path(
    put,
    path = "/api/courts/{id}",
    request_body = UpdateCourtRequest,
    params(("id" = i64, Path, description = "Court id")),
    responses(
        (status = 200, description = "Court updated", body = Court),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "courts"
)]
pub async fn update_court(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCourtRequest>,
) -> Result<Json<Court>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let court = repo::court::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Court {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(court))
}

/// DELETE /api/courts/{id}
#[utoipa::path(
    delete,
    path = "/api/courts/{id}",
    params(("id" = i64, Path, description = "Court id")),
    responses(
        (status = 200, description = "Court deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "courts"
)]
pub async fn delete_court(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::court::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Court {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Court deleted successfully")))
}

/// POST /api/courts/{id}/judges
#[utoipa::path(
    post,
    path = "/api/courts/{id}/judges",
    request_body = AssignJudgeToCourtRequest,
    params(("id" = i64, Path, description = "Court id")),
    responses(
        (status = 201, description = "Judge now works in the court", body = MessageResponse),
        (status = 404, description = "Court or judge not found", body = AppError),
        (status = 409, description = "Already assigned", body = AppError)
    ),
    tag = "courts"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn assign_judge_to_court(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<AssignJudgeToCourtRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let AuthRequired(claims) = auth;
    let mut tx = db::begin(&pool).await?;
    if !repo::court::exists(&mut *tx, id).await? {
        return Err(AppError::not_found("Court not found"));
    }
    if !repo::profile::judge_exists(&mut *tx, body.judge_id).await? {
        return Err(AppError::not_found("Judge not found"));
    }
    repo::court::add_judge(&mut *tx, id, body.judge_id).await?;
    record_audit(
        &mut tx,
        &claims,
        "assign",
        "judge_works_in",
        &format!("Judge {} assigned to court {id}", body.judge_id),
    )
    .await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Judge assigned to court"))))
}

/// POST /api/courts/{id}/prosecutors
#[utoipa::path(
    post,
    path = "/api/courts/{id}/prosecutors",
    request_body = AssignProsecutorRequest,
    params(("id" = i64, Path, description = "Court id")),
    responses(
        (status = 201, description = "Prosecutor assigned", body = MessageResponse),
        (status = 404, description = "Court or prosecutor not found", body = AppError),
        (status = 409, description = "Already assigned", body = AppError)
    ),
    tag = "courts"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn assign_prosecutor(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<AssignProsecutorRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let AuthRequired(claims) = auth;
    let mut tx = db::begin(&pool).await?;
    if !repo::court::exists(&mut *tx, id).await? {
        return Err(AppError::not_found("Court not found"));
    }
    if !repo::court::prosecutor_exists(&mut *tx, body.prosecutor_id).await? {
        return Err(AppError::not_found("Prosecutor not found"));
    }
    repo::court::add_prosecutor(&mut *tx, id, body.prosecutor_id).await?;
    record_audit(
        &mut tx,
        &claims,
        "assign",
        "prosecutor_assign",
        &format!("Prosecutor {} assigned to court {id}", body.prosecutor_id),
    )
    .await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(MessageResponse::new("Prosecutor assigned to court"))))
}

// ── Courtrooms ─────────────────────────────────────────────────────

/// POST /api/courtrooms
#[utoipa::path(
    post,
    path = "/api/courtrooms",
    request_body = CreateCourtroomRequest,
    responses(
        (status = 201, description = "Courtroom created", body = Courtroom),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Court not found", body = AppError)
    ),
    tag = "courtrooms"
)]
pub async fn create_courtroom(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateCourtroomRequest>,
) -> Result<(StatusCode, Json<Courtroom>), AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let courtroom = repo::court::create_courtroom(&mut *tx, &body).await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(courtroom)))
}

/// GET /api/courtrooms
#[utoipa::path(
    get,
    path = "/api/courtrooms",
    params(CourtroomListParams),
    responses((status = 200, description = "Courtrooms", body = Vec<Courtroom>)),
    tag = "courtrooms"
)]
pub async fn list_courtrooms(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(params): Query<CourtroomListParams>,
) -> Result<Json<Vec<Courtroom>>, AppError> {
    Ok(Json(repo::court::list_courtrooms(&pool, &params).await?))
}

/// GET /api/courtrooms/{id}
#[utoipa::path(
    get,
    path = "/api/courtrooms/{id}",
    params(("id" = i64, Path, description = "Courtroom id")),
    responses(
        (status = 200, description = "Courtroom found", body = Courtroom),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "courtrooms"
)]
pub async fn get_courtroom(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Courtroom>, AppError> {
    repo::court::find_courtroom(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Courtroom {id} not found")))
}

/// PUT /api/courtrooms/{id}
#[utoipa::path(
    put,
    path = "/api/courtrooms/{id}",
    request_body = UpdateCourtroomRequest,
    params(("id" = i64, Path, description = "Courtroom id")),
    responses(
        (status = 200, description = "Courtroom updated", body = Courtroom),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "courtrooms"
)]
pub async fn update_courtroom(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCourtroomRequest>,
) -> Result<Json<Courtroom>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let courtroom = repo::court::update_courtroom(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Courtroom {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(courtroom))
}

/// DELETE /api/courtrooms/{id}
#[utoipa::path(
    delete,
    path = "/api/courtrooms/{id}",
    params(("id" = i64, Path, description = "Courtroom id")),
    responses(
        (status = 200, description = "Courtroom deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "courtrooms"
)]
pub async fn delete_courtroom(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::court::delete_courtroom(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Courtroom {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Courtroom deleted successfully")))
}

// ── Prosecutors ────────────────────────────────────────────────────

/// POST /api/prosecutors
#[utoipa::path(
    post,
    path = "/api/prosecutors",
    request_body = CreateProsecutorRequest,
    responses(
        (status = 201, description = "Prosecutor created", body = Prosecutor),
        (status = 400, description = "Invalid request", body = AppError)
    ),
    tag = "courts"
)]
pub async fn create_prosecutor(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Json(body): Json<CreateProsecutorRequest>,
) -> Result<(StatusCode, Json<Prosecutor>), AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let prosecutor = repo::court::create_prosecutor(&mut *tx, &body).await?;
    db::commit(tx).await?;
    Ok((StatusCode::CREATED, Json(prosecutor)))
}

/// GET /api/prosecutors
#[utoipa::path(
    get,
    path = "/api/prosecutors",
    params(PageParams),
    responses((status = 200, description = "Prosecutors", body = Vec<Prosecutor>)),
    tag = "courts"
)]
pub async fn list_prosecutors(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<Prosecutor>>, AppError> {
    Ok(Json(repo::court::list_prosecutors(&pool, page.limit, page.offset).await?))
}
