use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::common::{is_blank, lenient_i64};
use crate::{AppError, Role};

// ── Profile completion input ───────────────────────────────────────

/// Role-specific fields sent in `profile_data`. Which fields are required
/// depends on the user's role; see [`ProfileData::into_role_profile`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProfileData {
    /// CaseParticipant: postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// CaseParticipant: optional representing lawyer (lawyer profile id).
    #[serde(default, alias = "lawyerId", deserialize_with = "lenient_i64")]
    pub lawyer_id: Option<i64>,
    /// Lawyer: bar licence number.
    #[serde(
        default,
        rename = "barLicense",
        alias = "bar_license",
        alias = "barlicenseno",
        deserialize_with = "lenient_i64"
    )]
    pub bar_license: Option<i64>,
    /// Lawyer and Judge: years of experience.
    #[serde(
        default,
        alias = "experienceYears",
        alias = "experience_years",
        deserialize_with = "lenient_i64"
    )]
    pub experience: Option<i64>,
    /// Lawyer and Judge.
    #[serde(default)]
    pub specialization: Option<String>,
    /// Judge and CourtRegistrar.
    #[serde(default)]
    pub position: Option<String>,
    /// Judge: optional appointment date.
    #[serde(default, alias = "appointmentDate")]
    pub appointment_date: Option<NaiveDate>,
}

/// Request DTO for `POST /api/complete-profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CompleteProfileRequest {
    /// Defaults to the signed-in user.
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub profile_data: ProfileData,
}

/// A validated, role-specific profile ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub enum RoleProfile {
    Admin,
    Lawyer {
        bar_license_no: i64,
        experience_years: i32,
        specialization: String,
    },
    Judge {
        position: String,
        specialization: String,
        experience_years: i32,
        appointment_date: Option<NaiveDate>,
    },
    CourtRegistrar {
        position: String,
    },
    CaseParticipant {
        address: String,
        lawyer_id: Option<i64>,
    },
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Admin => Role::Admin,
            RoleProfile::Lawyer { .. } => Role::Lawyer,
            RoleProfile::Judge { .. } => Role::Judge,
            RoleProfile::CourtRegistrar { .. } => Role::CourtRegistrar,
            RoleProfile::CaseParticipant { .. } => Role::CaseParticipant,
        }
    }
}

fn experience_years(value: Option<i64>) -> Result<i32, AppError> {
    let years = value.unwrap_or_default();
    if !(0..=100).contains(&years) {
        let mut field_errors = std::collections::HashMap::new();
        field_errors.insert(
            "experience".to_string(),
            "experience must be between 0 and 100".to_string(),
        );
        return Err(AppError::validation("Invalid experience", field_errors));
    }
    Ok(years as i32)
}

fn trimmed(value: Option<String>) -> String {
    value.map(|s| s.trim().to_string()).unwrap_or_default()
}

impl ProfileData {
    /// Validate the fields required for `role` and build the profile row.
    /// Missing fields fail with a validation error naming all of them.
    pub fn into_role_profile(self, role: Role) -> Result<RoleProfile, AppError> {
        let mut missing = Vec::new();

        match role {
            Role::Admin => Ok(RoleProfile::Admin),
            Role::CaseParticipant => {
                if is_blank(self.address.as_deref()) {
                    return Err(AppError::missing_fields(&["address"]));
                }
                Ok(RoleProfile::CaseParticipant {
                    address: trimmed(self.address),
                    lawyer_id: self.lawyer_id,
                })
            }
            Role::Lawyer => {
                if self.bar_license.is_none() {
                    missing.push("barLicense");
                }
                if self.experience.is_none() {
                    missing.push("experience");
                }
                if is_blank(self.specialization.as_deref()) {
                    missing.push("specialization");
                }
                if !missing.is_empty() {
                    return Err(AppError::missing_fields(&missing));
                }
                Ok(RoleProfile::Lawyer {
                    bar_license_no: self.bar_license.unwrap_or_default(),
                    experience_years: experience_years(self.experience)?,
                    specialization: trimmed(self.specialization),
                })
            }
            Role::Judge => {
                if is_blank(self.position.as_deref()) {
                    missing.push("position");
                }
                if is_blank(self.specialization.as_deref()) {
                    missing.push("specialization");
                }
                if self.experience.is_none() {
                    missing.push("experience");
                }
                if !missing.is_empty() {
                    return Err(AppError::missing_fields(&missing));
                }
                Ok(RoleProfile::Judge {
                    position: trimmed(self.position),
                    specialization: trimmed(self.specialization),
                    experience_years: experience_years(self.experience)?,
                    appointment_date: self.appointment_date,
                })
            }
            Role::CourtRegistrar => {
                if is_blank(self.position.as_deref()) {
                    return Err(AppError::missing_fields(&["position"]));
                }
                Ok(RoleProfile::CourtRegistrar {
                    position: trimmed(self.position),
                })
            }
        }
    }
}

/// Response for `POST /api/complete-profile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CompleteProfileResponse {
    pub message: String,
    pub user_id: i64,
    pub role: Role,
    /// Id of the created row in the role table.
    pub profile_id: i64,
}

// ── Role table rows ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Lawyer {
    pub id: i64,
    pub user_id: i64,
    pub bar_license_no: i64,
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Judge {
    pub id: i64,
    pub user_id: i64,
    pub position: Option<String>,
    pub appointment_date: Option<NaiveDate>,
    pub experience_years: Option<i32>,
    pub specialization: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CourtRegistrar {
    pub id: i64,
    pub user_id: i64,
    pub court_id: Option<i64>,
    pub position: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CaseParticipant {
    pub id: i64,
    pub user_id: i64,
    pub lawyer_id: Option<i64>,
    pub address: Option<String>,
}

// ── Profile views ──────────────────────────────────────────────────

/// Response for `GET /api/lawyerprofile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LawyerProfileResponse {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub cnic: Option<String>,
    pub dob: Option<NaiveDate>,
    pub specialization: Option<String>,
    pub bar_license: i64,
    pub experience: Option<i32>,
}

/// Merge-patch body for `PUT /api/lawyerprofile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct UpdateLawyerProfileRequest {
    #[serde(default)]
    #[cfg_attr(feature = "validation", validate(length(max = 255)))]
    pub specialization: Option<String>,
    #[serde(default, rename = "barLicense", deserialize_with = "lenient_i64")]
    pub bar_license: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub experience: Option<i64>,
}

/// Response for `GET /api/registrarprofile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RegistrarProfileResponse {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub cnic: Option<String>,
    pub dob: Option<NaiveDate>,
    pub position: Option<String>,
    #[serde(rename = "courtid")]
    pub court_id: Option<i64>,
}

/// Response for `GET /api/judgeprofile`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct JudgeProfileResponse {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub specialization: Option<String>,
    pub experience: Option<i32>,
    pub appointment_date: Option<NaiveDate>,
}
