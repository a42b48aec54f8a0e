use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::CaseActorRole;

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// A case record. Child collections (hearings, bail, evidence, ...) are
/// created separately and cascade-delete with the case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Case {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub casetype: Option<String>,
    pub filingdate: Option<NaiveDate>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST /api/cases`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCaseRequest {
    #[cfg_attr(
        feature = "validation",
        validate(
            required(message = "title is required"),
            length(min = 1, max = 255, message = "title must be 1-255 characters"),
            custom(function = "crate::common::not_blank")
        )
    )]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub casetype: Option<String>,
    #[serde(default)]
    pub filingdate: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 50)))]
    pub status: Option<String>,
}

/// Merge-patch body for `PUT /api/cases/{id}`. Absent fields keep their
/// stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateCaseRequest {
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(
            length(min = 1, max = 255, message = "title must be 1-255 characters"),
            custom(function = "crate::common::not_blank")
        )
    )]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub casetype: Option<String>,
    #[serde(default)]
    pub filingdate: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 50)))]
    pub status: Option<String>,
}

/// Query filters for `GET /api/cases`.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CaseListParams {
    /// Exact, case-insensitive status match.
    pub status: Option<String>,
    /// Exact, case-insensitive case type match.
    pub casetype: Option<String>,
    /// Case-insensitive substring match on the title.
    pub title: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Access grants
// ---------------------------------------------------------------------------

/// Body for `POST /api/cases/{id}/assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignCaseActorRequest {
    /// Lawyer or judge profile id, depending on `role`.
    pub assignee_id: i64,
    /// `lawyer` or `judge`, any casing.
    pub role: String,
}

/// Response for a successful assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignCaseActorResponse {
    pub message: String,
    pub case_id: i64,
    pub assignee_id: i64,
    pub role: CaseActorRole,
}

/// Body for `POST /api/cases/{id}/courts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LinkCourtRequest {
    pub court_id: i64,
}

/// Body for `POST /api/cases/{id}/participants`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LinkParticipantRequest {
    pub participant_id: i64,
}

/// Everyone and everything granted access to a case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CaseAccessResponse {
    pub case_id: i64,
    pub courts: Vec<i64>,
    pub lawyers: Vec<i64>,
    pub judges: Vec<i64>,
    pub participants: Vec<i64>,
}

// ---------------------------------------------------------------------------
// Case history
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseHistory {
    pub id: i64,
    pub case_id: i64,
    pub action_date: Option<NaiveDate>,
    pub action_taken: String,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCaseHistoryRequest {
    #[serde(default)]
    pub action_date: Option<NaiveDate>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "action_taken is required"), length(min = 1))
    )]
    pub action_taken: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateCaseHistoryRequest {
    #[serde(default)]
    pub action_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "action_taken must not be empty"))
    )]
    pub action_taken: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

/// Shared `limit`/`offset` query for nested collections.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
