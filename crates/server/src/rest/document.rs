use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CaseDocument, CreateCaseDocumentRequest, Document, MessageResponse, PageParams,
    UpdateDocumentRequest,
};

use crate::auth::extractors::AuthRequired;
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

use super::ensure_case;

/// POST /api/cases/{id}/documents
///
/// Creates the document and files it in the case in one transaction.
#[utoipa::path(
    post,
    path = "/api/cases/{id}/documents",
    request_body = CreateCaseDocumentRequest,
    params(("id" = i64, Path, description = "Case id")),
    responses(
        (status = 201, description = "Document filed", body = CaseDocument),
        (status = 400, description = "Invalid request", body = AppError),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "documents"
)]
pub async fn create_case_document(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Json(body): Json<CreateCaseDocumentRequest>,
) -> Result<(StatusCode, Json<CaseDocument>), AppError> {
    body.validate_request()?;

    let mut tx = db::begin(&pool).await?;
    ensure_case(&mut *tx, case_id).await?;
    let document = repo::document::create_for_case(&mut tx, case_id, &body).await?;
    db::commit(tx).await?;

    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/cases/{id}/documents
#[utoipa::path(
    get,
    path = "/api/cases/{id}/documents",
    params(("id" = i64, Path, description = "Case id"), PageParams),
    responses(
        (status = 200, description = "Documents filed in the case", body = Vec<CaseDocument>),
        (status = 404, description = "Case not found", body = AppError)
    ),
    tag = "documents"
)]
pub async fn list_case_documents(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(case_id): Path<i64>,
    Query(page): Query<PageParams>,
) -> Result<Json<Vec<CaseDocument>>, AppError> {
    ensure_case(&pool, case_id).await?;
    Ok(Json(repo::document::list_for_case(&pool, case_id, &page).await?))
}

/// GET /api/documents/{id}
#[utoipa::path(
    get,
    path = "/api/documents/{id}",
    params(("id" = i64, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document found", body = Document),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "documents"
)]
pub async fn get_document(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<Document>, AppError> {
    repo::document::find_by_id(&pool, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))
}

/// PUT /api/documents/{id}
#[utoipa::path(
    put,
    path = "/api/documents/{id}",
    request_body = UpdateDocumentRequest,
    params(("id" = i64, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document updated", body = Document),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "documents"
)]
pub async fn update_document(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
    Json(body): Json<UpdateDocumentRequest>,
) -> Result<Json<Document>, AppError> {
    body.validate_request()?;
    let mut tx = db::begin(&pool).await?;
    let document = repo::document::update(&mut *tx, id, &body)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Document {id} not found")))?;
    db::commit(tx).await?;
    Ok(Json(document))
}

/// DELETE /api/documents/{id}
#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(("id" = i64, Path, description = "Document id")),
    responses(
        (status = 200, description = "Document deleted", body = MessageResponse),
        (status = 404, description = "Not found", body = AppError)
    ),
    tag = "documents"
)]
pub async fn delete_document(
    State(pool): State<Pool<Postgres>>,
    _auth: AuthRequired,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    let mut tx = db::begin(&pool).await?;
    if !repo::document::delete(&mut *tx, id).await? {
        return Err(AppError::not_found(format!("Document {id} not found")));
    }
    db::commit(tx).await?;
    Ok(Json(MessageResponse::new("Document deleted successfully")))
}
