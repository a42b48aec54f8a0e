use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An `audit_log` row. `admin_id` is set when the acting user was an admin
/// and becomes `NULL` if that admin is later removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct AuditLogEntry {
    pub id: i64,
    pub admin_id: Option<i64>,
    pub action_type: String,
    pub entity_type: String,
    pub description: Option<String>,
    pub status: String,
    pub action_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct AuditLogParams {
    pub entity_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
