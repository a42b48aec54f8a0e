use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::AppError;

// ---------------------------------------------------------------------------
// Final decision
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct FinalDecision {
    pub id: i64,
    pub case_id: i64,
    pub decision_date: Option<NaiveDate>,
    pub summary: Option<String>,
    pub verdict: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateDecisionRequest {
    #[cfg_attr(feature = "validation", validate(required(message = "case_id is required")))]
    pub case_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "verdict is required"), length(min = 1, max = 255))
    )]
    pub verdict: Option<String>,
    #[serde(default)]
    pub decision_date: Option<NaiveDate>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateDecisionRequest {
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "must be 1-255 characters"))
    )]
    pub verdict: Option<String>,
    #[serde(default)]
    pub decision_date: Option<NaiveDate>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// `?case_id` filter shared by decisions and remands.
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct CaseChildListParams {
    pub case_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Remand
// ---------------------------------------------------------------------------

/// A custody remand period. `end_date >= start_date` is enforced by the
/// `remands_window_check` constraint as well as on create.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Remand {
    pub id: i64,
    pub case_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub remand_type: Option<String>,
    pub reason: Option<String>,
    pub remanded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateRemandRequest {
    #[cfg_attr(feature = "validation", validate(required(message = "case_id is required")))]
    pub case_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "start_date is required"))
    )]
    pub start_date: Option<NaiveDate>,
    #[cfg_attr(feature = "validation", validate(required(message = "end_date is required")))]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub remand_type: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl CreateRemandRequest {
    /// Reject a remand that ends before it starts.
    pub fn check_window(&self) -> Result<(), AppError> {
        check_window(self.start_date, self.end_date)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateRemandRequest {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub remand_type: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl UpdateRemandRequest {
    /// Only checks when both ends are supplied; a one-sided patch is
    /// checked by the database constraint.
    pub fn check_window(&self) -> Result<(), AppError> {
        check_window(self.start_date, self.end_date)
    }
}

fn check_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => {
            let mut field_errors = HashMap::new();
            field_errors.insert(
                "end_date".to_string(),
                "end_date must not be before start_date".to_string(),
            );
            Err(AppError::validation("Invalid remand period", field_errors))
        }
        _ => Ok(()),
    }
}
