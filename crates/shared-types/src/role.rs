use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::AppError;

/// The closed set of account roles. Stored in `users.role` using the
/// canonical casing returned by [`Role::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    Admin,
    Lawyer,
    Judge,
    CourtRegistrar,
    CaseParticipant,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::Lawyer,
        Role::Judge,
        Role::CourtRegistrar,
        Role::CaseParticipant,
    ];

    /// Canonical casing used in the database and in session tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Lawyer => "Lawyer",
            Role::Judge => "Judge",
            Role::CourtRegistrar => "CourtRegistrar",
            Role::CaseParticipant => "CaseParticipant",
        }
    }

    /// Parse user input. Case-insensitive; spaces, underscores and hyphens
    /// are ignored so "court_registrar" and "Court Registrar" both match.
    pub fn parse(input: &str) -> Option<Role> {
        let key: String = input
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "admin" => Some(Role::Admin),
            "lawyer" => Some(Role::Lawyer),
            "judge" => Some(Role::Judge),
            "courtregistrar" => Some(Role::CourtRegistrar),
            "caseparticipant" => Some(Role::CaseParticipant),
            _ => None,
        }
    }

    /// Exact match against the canonical form, used when reading values
    /// that were already canonicalised on write.
    pub fn from_canonical(s: &str) -> Option<Role> {
        Role::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| AppError::invalid_role(s))
    }
}

/// Roles that may be attached to a case through `POST /api/cases/{id}/assign`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CaseActorRole {
    Lawyer,
    Judge,
}

impl CaseActorRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseActorRole::Lawyer => "lawyer",
            CaseActorRole::Judge => "judge",
        }
    }
}

impl FromStr for CaseActorRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lawyer" => Ok(CaseActorRole::Lawyer),
            "judge" => Ok(CaseActorRole::Judge),
            _ => Err(AppError::invalid_role(s)),
        }
    }
}
