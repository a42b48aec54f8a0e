use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A document record. Attached to cases through `document_case`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Document {
    pub id: i64,
    pub document_type: Option<String>,
    pub document_title: String,
    pub upload_date: Option<NaiveDate>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A document as filed in one case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseDocument {
    pub id: i64,
    pub case_id: i64,
    pub document_type: Option<String>,
    pub document_title: String,
    pub upload_date: Option<NaiveDate>,
    pub file_path: Option<String>,
    pub submission_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCaseDocumentRequest {
    #[cfg_attr(
        feature = "validation",
        validate(
            required(message = "document_title is required"),
            length(min = 1, max = 255)
        )
    )]
    pub document_title: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub document_type: Option<String>,
    #[serde(default)]
    pub upload_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 500)))]
    pub file_path: Option<String>,
    /// Defaults to today.
    #[serde(default)]
    pub submission_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateDocumentRequest {
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "must be 1-255 characters"))
    )]
    pub document_title: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub document_type: Option<String>,
    #[serde(default)]
    pub upload_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 500)))]
    pub file_path: Option<String>,
}
