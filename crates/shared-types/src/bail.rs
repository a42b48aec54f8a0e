use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

// ---------------------------------------------------------------------------
// Bail
// ---------------------------------------------------------------------------

/// A bail record. `amount` is stored as NUMERIC(10,2).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Bail {
    pub id: i64,
    pub case_id: i64,
    pub surety_id: i64,
    pub status: Option<String>,
    pub amount: Option<f64>,
    pub bail_date: Option<NaiveDate>,
    pub remarks: Option<String>,
    pub bail_condition: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateBailRequest {
    #[cfg_attr(feature = "validation", validate(required(message = "case_id is required")))]
    pub case_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "surety_id is required"))
    )]
    pub surety_id: Option<i64>,
    #[cfg_attr(
        feature = "validation",
        validate(
            required(message = "amount is required"),
            range(
                min = 0.0,
                max = 99_999_999.99,
                message = "amount must be between 0 and 99999999.99"
            )
        )
    )]
    pub amount: Option<f64>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 50)))]
    pub status: Option<String>,
    #[serde(default)]
    pub bail_date: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub bail_condition: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateBailRequest {
    #[serde(default)]
    pub surety_id: Option<i64>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(range(
            min = 0.0,
            max = 99_999_999.99,
            message = "amount must be between 0 and 99999999.99"
        ))
    )]
    pub amount: Option<f64>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 50)))]
    pub status: Option<String>,
    #[serde(default)]
    pub bail_date: Option<NaiveDate>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub bail_condition: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct BailListParams {
    pub case_id: Option<i64>,
    /// Exact, case-insensitive status match.
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Surety
// ---------------------------------------------------------------------------

/// A person standing surety for one or more bails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Surety {
    pub id: i64,
    pub cnic: String,
    pub phone: String,
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub past_history: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateSuretyRequest {
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "cnic is required"), length(min = 1, max = 15))
    )]
    pub cnic: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "phone is required"), length(min = 1, max = 15))
    )]
    pub phone: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub firstname: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub lastname: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub address: Option<String>,
    #[serde(default)]
    pub past_history: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateSuretyRequest {
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 15, message = "must be 1-15 characters"))
    )]
    pub cnic: Option<String>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 15, message = "must be 1-15 characters"))
    )]
    pub phone: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub firstname: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub lastname: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub address: Option<String>,
    #[serde(default)]
    pub past_history: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct SuretyListParams {
    /// Exact CNIC match.
    pub cnic: Option<String>,
    /// Case-insensitive substring match on first or last name.
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
