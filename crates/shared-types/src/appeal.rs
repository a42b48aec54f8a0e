use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Appeal {
    pub id: i64,
    pub case_id: i64,
    pub appeal_date: NaiveDate,
    pub status: Option<String>,
    pub decision_date: Option<NaiveDate>,
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateAppealRequest {
    #[cfg_attr(feature = "validation", validate(required(message = "case_id is required")))]
    pub case_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "appeal_date is required"))
    )]
    pub appeal_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub status: Option<String>,
    #[serde(default)]
    pub decision_date: Option<NaiveDate>,
    #[serde(default)]
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateAppealRequest {
    #[serde(default)]
    pub appeal_date: Option<NaiveDate>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 100)))]
    pub status: Option<String>,
    #[serde(default)]
    pub decision_date: Option<NaiveDate>,
    #[serde(default)]
    pub decision: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct AppealListParams {
    pub case_id: Option<i64>,
    /// Exact, case-insensitive status match.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
