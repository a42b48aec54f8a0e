use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

// ---------------------------------------------------------------------------
// Court
// ---------------------------------------------------------------------------

/// A court. Related to cases through `court_access`, to judges through
/// `judge_works_in` and to prosecutors through `prosecutor_assign`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Court {
    pub id: i64,
    pub courtname: String,
    #[serde(rename = "type")]
    pub court_type: String,
    pub location: String,
}

/// Request body for `POST /api/court`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCourtRequest {
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "courtname is required"), length(min = 1, max = 255))
    )]
    pub courtname: Option<String>,
    #[serde(rename = "type")]
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "type is required"), length(min = 1, max = 255))
    )]
    pub court_type: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "location is required"), length(min = 1, max = 255))
    )]
    pub location: Option<String>,
}

/// Merge-patch body for `PUT /api/courts/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateCourtRequest {
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "must be 1-255 characters"))
    )]
    pub courtname: Option<String>,
    #[serde(default, rename = "type")]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "must be 1-255 characters"))
    )]
    pub court_type: Option<String>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "must be 1-255 characters"))
    )]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CourtListParams {
    /// Case-insensitive substring match on the court name.
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub court_type: Option<String>,
    pub location: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Courtroom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Courtroom {
    pub id: i64,
    pub court_id: i64,
    pub courtroom_no: i32,
    pub capacity: Option<i32>,
    pub availability: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCourtroomRequest {
    #[cfg_attr(feature = "validation", validate(required(message = "court_id is required")))]
    pub court_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "courtroom_no is required"))
    )]
    pub courtroom_no: Option<i32>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0, message = "capacity must not be negative"))
    )]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub availability: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateCourtroomRequest {
    #[serde(default)]
    pub courtroom_no: Option<i32>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0, message = "capacity must not be negative"))
    )]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub availability: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CourtroomListParams {
    pub court_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Prosecutor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Prosecutor {
    pub id: i64,
    pub name: String,
    pub experience: Option<i32>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateProsecutorRequest {
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "name is required"), length(min = 1, max = 255))
    )]
    pub name: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 0, message = "experience must not be negative"))
    )]
    pub experience: Option<i32>,
    #[serde(default)]
    pub status: Option<String>,
}

// ---------------------------------------------------------------------------
// Court-side grants
// ---------------------------------------------------------------------------

/// Body for `POST /api/courts/{id}/judges`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignJudgeToCourtRequest {
    pub judge_id: i64,
}

/// Body for `POST /api/courts/{id}/prosecutors`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AssignProsecutorRequest {
    pub prosecutor_id: i64,
}
