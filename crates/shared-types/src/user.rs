use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Role;

/// A row of the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub role: String,
    pub firstname: String,
    pub lastname: Option<String>,
    pub email: String,
    pub phoneno: Option<String>,
    pub cnic: Option<String>,
    pub dob: Option<NaiveDate>,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role as stored. Values are canonical because of the `users_role_check`
    /// constraint, so `None` means the row was written outside this service.
    pub fn role(&self) -> Option<Role> {
        Role::from_canonical(&self.role)
    }

    pub fn display_name(&self) -> String {
        match self.lastname.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.firstname, last),
            _ => self.firstname.clone(),
        }
    }
}

/// Request DTO for `POST /api/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SignupRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, max = 255, message = "First name is required"))
    )]
    pub firstname: String,
    #[serde(default)]
    pub lastname: Option<String>,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "Valid email is required"))
    )]
    pub email: String,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 15, message = "Phone number must be at most 15 characters"))
    )]
    pub phoneno: Option<String>,
    #[serde(default)]
    #[cfg_attr(
        feature = "validation",
        validate(length(max = 15, message = "CNIC must be at most 15 characters"))
    )]
    pub cnic: Option<String>,
    #[serde(default)]
    pub dob: Option<NaiveDate>,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
    pub role: String,
}

/// Response for a successful signup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SignupResponse {
    pub message: String,
    pub user_id: i64,
    pub role: Role,
}

/// Request DTO for `POST /api/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct LoginResponse {
    pub message: String,
    pub email: String,
    pub role: Role,
}

/// Response for `GET /api/dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardResponse {
    pub username: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barlicenseno: Option<i64>,
}
