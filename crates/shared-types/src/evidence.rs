use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// An evidence item filed against a case. `file_path` is a plain reference;
/// this service stores no file contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Evidence {
    pub id: i64,
    pub case_id: i64,
    pub evidence_type: String,
    pub description: Option<String>,
    pub submitted_date: Option<NaiveDate>,
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateEvidenceRequest {
    #[cfg_attr(
        feature = "validation",
        validate(
            required(message = "evidence_type is required"),
            length(min = 1, max = 100)
        )
    )]
    pub evidence_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub submitted_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 500)))]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateEvidenceRequest {
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 100, message = "must be 1-100 characters"))
    )]
    pub evidence_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub submitted_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 500)))]
    pub file_path: Option<String>,
}
