//! Role profile tables. Each table holds at most one row per user
//! (`<table>_user_id_key`), so a repeated profile completion surfaces as a
//! conflict from the database.

use shared_types::{
    AppError, CourtRegistrar, Judge, Lawyer, RoleProfile,
    UpdateLawyerProfileRequest,
};
use sqlx::PgExecutor;

use crate::error_convert::SqlxErrorExt;

const LAWYER_COLUMNS: &str = "id, user_id, bar_license_no, specialization, experience_years";
const JUDGE_COLUMNS: &str =
    "id, user_id, position, appointment_date, experience_years, specialization";

/// Insert the role-specific profile row and return its id.
pub async fn create(
    db: impl PgExecutor<'_>,
    user_id: i64,
    profile: &RoleProfile,
) -> Result<i64, AppError> {
    let query = match profile {
        RoleProfile::Admin => {
            sqlx::query_scalar("INSERT INTO admins (user_id) VALUES ($1) RETURNING id").bind(user_id)
        }
        RoleProfile::Lawyer {
            bar_license_no,
            experience_years,
            specialization,
        } => sqlx::query_scalar(
            r#"
            INSERT INTO lawyers (user_id, bar_license_no, specialization, experience_years)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(*bar_license_no)
        .bind(specialization.as_str())
        .bind(*experience_years),
        RoleProfile::Judge {
            position,
            specialization,
            experience_years,
            appointment_date,
        } => sqlx::query_scalar(
            r#"
            INSERT INTO judges (user_id, position, specialization, experience_years, appointment_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(position.as_str())
        .bind(specialization.as_str())
        .bind(*experience_years)
        .bind(*appointment_date),
        RoleProfile::CourtRegistrar { position } => sqlx::query_scalar(
            "INSERT INTO court_registrars (user_id, position) VALUES ($1, $2) RETURNING id",
        )
        .bind(user_id)
        .bind(position.as_str()),
        RoleProfile::CaseParticipant { address, lawyer_id } => sqlx::query_scalar(
            "INSERT INTO case_participants (user_id, address, lawyer_id) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(user_id)
        .bind(address.as_str())
        .bind(*lawyer_id),
    };

    query
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn admin_id_for_user(db: impl PgExecutor<'_>, user_id: i64) -> Result<Option<i64>, AppError> {
    sqlx::query_scalar("SELECT id FROM admins WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

// -- Lawyers ----------------------------------------------------------------

pub async fn lawyer_for_user(db: impl PgExecutor<'_>, user_id: i64) -> Result<Option<Lawyer>, AppError> {
    let sql = format!("SELECT {LAWYER_COLUMNS} FROM lawyers WHERE user_id = $1");
    sqlx::query_as::<_, Lawyer>(&sql)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn lawyer_exists(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM lawyers WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Merge-patch the lawyer's editable fields.
pub async fn update_lawyer(
    db: impl PgExecutor<'_>,
    id: i64,
    req: &UpdateLawyerProfileRequest,
    experience_years: Option<i32>,
) -> Result<Lawyer, AppError> {
    let sql = format!(
        r#"
        UPDATE lawyers SET
            specialization   = COALESCE($2, specialization),
            bar_license_no   = COALESCE($3, bar_license_no),
            experience_years = COALESCE($4, experience_years)
        WHERE id = $1
        RETURNING {LAWYER_COLUMNS}
        "#
    );
    sqlx::query_as::<_, Lawyer>(&sql)
        .bind(id)
        .bind(req.specialization.as_deref().map(str::trim))
        .bind(req.bar_license)
        .bind(experience_years)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

// -- Judges -----------------------------------------------------------------

pub async fn judge_for_user(db: impl PgExecutor<'_>, user_id: i64) -> Result<Option<Judge>, AppError> {
    let sql = format!("SELECT {JUDGE_COLUMNS} FROM judges WHERE user_id = $1");
    sqlx::query_as::<_, Judge>(&sql)
        .bind(user_id)
        .fetch_optional(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

pub async fn judge_exists(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM judges WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

// -- Court registrars -------------------------------------------------------

pub async fn registrar_for_user(
    db: impl PgExecutor<'_>,
    user_id: i64,
) -> Result<Option<CourtRegistrar>, AppError> {
    sqlx::query_as::<_, CourtRegistrar>(
        "SELECT id, user_id, court_id, position FROM court_registrars WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn set_registrar_court(
    db: impl PgExecutor<'_>,
    registrar_id: i64,
    court_id: i64,
) -> Result<(), AppError> {
    sqlx::query("UPDATE court_registrars SET court_id = $2 WHERE id = $1")
        .bind(registrar_id)
        .bind(court_id)
        .execute(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

// -- Case participants ------------------------------------------------------

pub async fn participant_exists(db: impl PgExecutor<'_>, id: i64) -> Result<bool, AppError> {
    sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM case_participants WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
