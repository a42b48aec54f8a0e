use axum::{extract::FromRequestParts, http::request::Parts};
use shared_types::{AppError, Role};

use super::jwt::Claims;

/// Role constants for [`RoleRequired`].
pub const ADMIN: u8 = 0;
pub const LAWYER: u8 = 1;
pub const JUDGE: u8 = 2;
pub const COURT_REGISTRAR: u8 = 3;
pub const CASE_PARTICIPANT: u8 = 4;

fn required_role(code: u8) -> Role {
    match code {
        LAWYER => Role::Lawyer,
        JUDGE => Role::Judge,
        COURT_REGISTRAR => Role::CourtRegistrar,
        CASE_PARTICIPANT => Role::CaseParticipant,
        _ => Role::Admin,
    }
}

fn claims_from(parts: &Parts) -> Result<Claims, AppError> {
    parts
        .extensions
        .get::<Claims>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))
}

/// Extractor that requires authentication. Returns 401 if no live session.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        claims_from(parts).map(AuthRequired)
    }
}

/// Extractor that optionally extracts the principal. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Extractor that requires authentication AND an exact role.
/// Returns 401 if unauthenticated, 403 for any other role.
pub struct RoleRequired<const ROLE: u8>(pub Claims);

impl<const ROLE: u8, S: Send + Sync> FromRequestParts<S> for RoleRequired<ROLE> {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let claims = claims_from(parts)?;
        let required = required_role(ROLE);
        if claims.role != required {
            return Err(AppError::forbidden(format!("{} role required", required.as_str())));
        }
        Ok(RoleRequired(claims))
    }
}
