use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A scheduled hearing for a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Hearing {
    pub id: i64,
    pub case_id: i64,
    pub hearing_date: NaiveDate,
    pub hearing_time: Option<NaiveTime>,
    pub venue: Option<String>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateHearingRequest {
    #[cfg_attr(feature = "validation", validate(required(message = "case_id is required")))]
    pub case_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "hearing_date is required"))
    )]
    pub hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub hearing_time: Option<NaiveTime>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub venue: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateHearingRequest {
    #[serde(default)]
    pub hearing_date: Option<NaiveDate>,
    #[serde(default)]
    pub hearing_time: Option<NaiveTime>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub venue: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct HearingListParams {
    pub case_id: Option<i64>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
