use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::Role;

/// Claims carried by the session token. `sid` names the `sessions` row that
/// must still be live for the token to be accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: Role,
    pub sid: String,
    pub iat: i64,
    pub exp: i64,
}

fn session_secret() -> Result<Vec<u8>, jsonwebtoken::errors::Error> {
    match std::env::var("SESSION_SECRET") {
        Ok(secret) if !secret.is_empty() => Ok(secret.into_bytes()),
        _ => Err(ErrorKind::InvalidKeyFormat.into()),
    }
}

pub fn session_ttl_hours() -> i64 {
    std::env::var("SESSION_TTL_HOURS")
        .ok()
        .and_then(|v| v.parse().ok())
        .filter(|h: &i64| *h > 0)
        .unwrap_or(12)
}

/// Expiry for a session issued now.
pub fn session_expiry() -> DateTime<Utc> {
    Utc::now() + Duration::hours(session_ttl_hours())
}

/// Sign an HS256 session token for `sid`, valid until `expires_at`.
pub fn create_session_token(
    user_id: i64,
    email: &str,
    role: Role,
    sid: &str,
    expires_at: DateTime<Utc>,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        sid: sid.to_string(),
        iat: Utc::now().timestamp(),
        exp: expires_at.timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&session_secret()?),
    )
}

/// Verify signature and expiry. Whether the session is still live is
/// checked separately against the `sessions` table.
pub fn validate_session_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&session_secret()?),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
