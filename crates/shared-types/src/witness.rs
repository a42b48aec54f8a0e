use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// A witness. Linked to cases through `witness_case`, which carries the
/// statement given in that case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Witness {
    pub id: i64,
    pub firstname: String,
    pub lastname: String,
    pub cnic: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub past_history: Option<String>,
}

/// A witness as seen from one case: the witness row joined with its link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseWitness {
    pub id: i64,
    pub case_id: i64,
    pub firstname: String,
    pub lastname: String,
    pub cnic: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub past_history: Option<String>,
    pub statement: Option<String>,
    pub statement_date: Option<NaiveDate>,
}

/// Body for `POST /api/cases/{id}/witnesses`. Creates the witness and its
/// case link together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCaseWitnessRequest {
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "firstname is required"), length(min = 1, max = 255))
    )]
    pub firstname: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "lastname is required"), length(min = 1, max = 255))
    )]
    pub lastname: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(required(message = "cnic is required"), length(min = 1, max = 15))
    )]
    pub cnic: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 15)))]
    pub phone: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub address: Option<String>,
    #[serde(default)]
    pub past_history: Option<String>,
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub statement_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateWitnessRequest {
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "must be 1-255 characters"))
    )]
    pub firstname: Option<String>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "must be 1-255 characters"))
    )]
    pub lastname: Option<String>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 15, message = "must be 1-15 characters"))
    )]
    pub cnic: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 15)))]
    pub phone: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(email(message = "Valid email is required")))]
    pub email: Option<String>,
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub address: Option<String>,
    #[serde(default)]
    pub past_history: Option<String>,
}
