pub mod admin;
pub mod appeal;
pub mod auth;
pub mod bail;
pub mod case;
pub mod case_history;
pub mod court;
pub mod decision;
pub mod document;
pub mod evidence;
pub mod hearing;
pub mod payment;
pub mod profile;
pub mod witness;

use axum::{routing::{get, post}, Router};
use shared_types::{AppError, Role};
use sqlx::{PgConnection, PgExecutor};

use crate::auth::jwt::Claims;
use crate::db::AppState;
use crate::repo;

/// 404 "Case not found" unless the case exists. Runs on the caller's
/// transaction so the check and the write see the same snapshot.
pub(crate) async fn ensure_case(db: impl PgExecutor<'_>, case_id: i64) -> Result<(), AppError> {
    if repo::case::exists(db, case_id).await? {
        Ok(())
    } else {
        Err(AppError::not_found("Case not found"))
    }
}

/// Write an `audit_log` row on the caller's transaction. The admin id is
/// filled in only when the acting user is an admin with a profile.
pub(crate) async fn record_audit(
    conn: &mut PgConnection,
    claims: &Claims,
    action_type: &str,
    entity_type: &str,
    description: &str,
) -> Result<(), AppError> {
    let admin_id = match claims.role {
        Role::Admin => repo::profile::admin_id_for_user(&mut *conn, claims.sub).await?,
        _ => None,
    };
    repo::audit::record(&mut *conn, admin_id, action_type, entity_type, description).await
}

/// Build the REST API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Accounts and sessions
        .route("/api/signup", post(auth::signup))
        .route("/api/login", post(auth::login))
        .route("/api/logout", post(auth::logout))
        // Profiles
        .route("/api/complete-profile", post(profile::complete_profile))
        .route("/api/dashboard", get(profile::dashboard))
        .route(
            "/api/lawyerprofile",
            get(profile::get_lawyer_profile).put(profile::update_lawyer_profile),
        )
        .route("/api/registrarprofile", get(profile::get_registrar_profile))
        .route("/api/judgeprofile", get(profile::get_judge_profile))
        // Courts
        .route("/api/court", get(court::get_registrar_court).post(court::create_court))
        .route("/api/courts", get(court::list_courts))
        .route(
            "/api/courts/{id}",
            get(court::get_court).put(court::update_court).delete(court::delete_court),
        )
        .route("/api/courts/{id}/judges", post(court::assign_judge_to_court))
        .route("/api/courts/{id}/prosecutors", post(court::assign_prosecutor))
        .route(
            "/api/courtrooms",
            get(court::list_courtrooms).post(court::create_courtroom),
        )
        .route(
            "/api/courtrooms/{id}",
            get(court::get_courtroom)
                .put(court::update_courtroom)
                .delete(court::delete_courtroom),
        )
        .route(
            "/api/prosecutors",
            get(court::list_prosecutors).post(court::create_prosecutor),
        )
        // Cases and access grants
        .route("/api/cases", get(case::list_cases).post(case::create_case))
        .route(
            "/api/cases/{id}",
            get(case::get_case).put(case::update_case).delete(case::delete_case),
        )
        .route("/api/cases/{id}/assign", post(case::assign_case_actor))
        .route("/api/cases/{id}/courts", post(case::link_court))
        .route("/api/cases/{id}/participants", post(case::link_participant))
        .route("/api/cases/{id}/access", get(case::get_case_access))
        // Case-scoped collections
        .route(
            "/api/cases/{id}/evidence",
            get(evidence::list_case_evidence).post(evidence::create_evidence),
        )
        .route(
            "/api/cases/{id}/witnesses",
            get(witness::list_case_witnesses).post(witness::create_case_witness),
        )
        .route(
            "/api/cases/{id}/documents",
            get(document::list_case_documents).post(document::create_case_document),
        )
        .route(
            "/api/cases/{id}/history",
            get(case_history::list_case_history).post(case_history::create_case_history),
        )
        .route(
            "/api/evidence/{id}",
            get(evidence::get_evidence)
                .put(evidence::update_evidence)
                .delete(evidence::delete_evidence),
        )
        .route(
            "/api/witnesses/{id}",
            get(witness::get_witness)
                .put(witness::update_witness)
                .delete(witness::delete_witness),
        )
        .route(
            "/api/documents/{id}",
            get(document::get_document)
                .put(document::update_document)
                .delete(document::delete_document),
        )
        .route(
            "/api/case-history/{id}",
            get(case_history::get_case_history)
                .put(case_history::update_case_history)
                .delete(case_history::delete_case_history),
        )
        // Hearings
        .route(
            "/api/hearings",
            get(hearing::list_hearings).post(hearing::create_hearing),
        )
        .route(
            "/api/hearings/{id}",
            get(hearing::get_hearing)
                .put(hearing::update_hearing)
                .delete(hearing::delete_hearing),
        )
        // Bail and sureties
        .route("/api/bails", get(bail::list_bails).post(bail::create_bail))
        .route(
            "/api/bails/{id}",
            get(bail::get_bail).put(bail::update_bail).delete(bail::delete_bail),
        )
        .route("/api/surety", get(bail::list_sureties).post(bail::create_surety))
        .route(
            "/api/surety/{id}",
            get(bail::get_surety)
                .put(bail::update_surety)
                .delete(bail::delete_surety),
        )
        // Appeals, decisions, remands
        .route("/api/appeals", get(appeal::list_appeals).post(appeal::create_appeal))
        .route(
            "/api/appeals/{id}",
            get(appeal::get_appeal)
                .put(appeal::update_appeal)
                .delete(appeal::delete_appeal),
        )
        .route(
            "/api/decisions",
            get(decision::list_decisions).post(decision::create_decision),
        )
        .route(
            "/api/decisions/{id}",
            get(decision::get_decision)
                .put(decision::update_decision)
                .delete(decision::delete_decision),
        )
        .route("/api/remands", get(decision::list_remands).post(decision::create_remand))
        .route(
            "/api/remands/{id}",
            get(decision::get_remand)
                .put(decision::update_remand)
                .delete(decision::delete_remand),
        )
        // Payments
        .route(
            "/api/payments",
            get(payment::list_payments).post(payment::create_payment),
        )
        // Admin
        .route("/api/admin/logs", get(admin::list_audit_logs))
}
