use axum::Router;
use shared_types::{
    // Accounts and profiles
    AppError, AppErrorKind, CaseParticipant, CompleteProfileRequest, CompleteProfileResponse,
    CourtRegistrar, DashboardResponse, Judge, JudgeProfileResponse, Lawyer, LawyerProfileResponse,
    LoginRequest, LoginResponse, MessageResponse, ProfileData, RegistrarProfileResponse, Role,
    SignupRequest, SignupResponse, UpdateLawyerProfileRequest,
    // Courts
    AssignJudgeToCourtRequest, AssignProsecutorRequest, Court, Courtroom, CreateCourtRequest,
    CreateCourtroomRequest, CreateProsecutorRequest, Prosecutor, UpdateCourtRequest,
    UpdateCourtroomRequest,
    // Cases and grants
    AssignCaseActorRequest, AssignCaseActorResponse, Case, CaseAccessResponse, CaseActorRole,
    CreateCaseRequest, LinkCourtRequest, LinkParticipantRequest, UpdateCaseRequest,
    // Case children
    Appeal, Bail, CaseDocument, CaseHistory, CaseWitness, CreateAppealRequest, CreateBailRequest,
    CreateCaseDocumentRequest, CreateCaseHistoryRequest, CreateCaseWitnessRequest,
    CreateDecisionRequest, CreateEvidenceRequest, CreateHearingRequest, CreateRemandRequest,
    CreateSuretyRequest, Document, Evidence, FinalDecision, Hearing, Remand, Surety,
    UpdateAppealRequest, UpdateBailRequest, UpdateCaseHistoryRequest, UpdateDecisionRequest,
    UpdateDocumentRequest, UpdateEvidenceRequest, UpdateHearingRequest, UpdateRemandRequest,
    UpdateSuretyRequest, UpdateWitnessRequest, Witness,
    // Payments and audit
    AuditLogEntry, CreatePaymentRequest, PaymentMode, PaymentRecord,
};
use sqlx::{Pool, Postgres};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::db::AppState;
use crate::health;
use crate::rest;

/// OpenAPI documentation for the API.
#[derive(OpenApi)]
#[openapi(
    paths(
        // Accounts
        rest::auth::signup,
        rest::auth::login,
        rest::auth::logout,
        // Profiles
        rest::profile::complete_profile,
        rest::profile::dashboard,
        rest::profile::get_lawyer_profile,
        rest::profile::update_lawyer_profile,
        rest::profile::get_registrar_profile,
        rest::profile::get_judge_profile,
        // Courts
        rest::court::create_court,
        rest::court::get_registrar_court,
        rest::court::list_courts,
        rest::court::get_court,
        rest::court::update_court,
        rest::court::delete_court,
        rest::court::assign_judge_to_court,
        rest::court::assign_prosecutor,
        rest::court::create_courtroom,
        rest::court::list_courtrooms,
        rest::court::get_courtroom,
        rest::court::update_courtroom,
        rest::court::delete_courtroom,
        rest::court::create_prosecutor,
        rest::court::list_prosecutors,
        // Cases
        rest::case::list_cases,
        rest::case::create_case,
        rest::case::get_case,
        rest::case::update_case,
        rest::case::delete_case,
        rest::case::assign_case_actor,
        rest::case::link_court,
        rest::case::link_participant,
        rest::case::get_case_access,
        // Case-scoped collections
        rest::evidence::create_evidence,
        rest::evidence::list_case_evidence,
        rest::evidence::get_evidence,
        rest::evidence::update_evidence,
        rest::evidence::delete_evidence,
        rest::witness::create_case_witness,
        rest::witness::list_case_witnesses,
        rest::witness::get_witness,
        rest::witness::update_witness,
        rest::witness::delete_witness,
        rest::document::create_case_document,
        rest::document::list_case_documents,
        rest::document::get_document,
        rest::document::update_document,
        rest::document::delete_document,
        rest::case_history::create_case_history,
        rest::case_history::list_case_history,
        rest::case_history::get_case_history,
        rest::case_history::update_case_history,
        rest::case_history::delete_case_history,
        // Hearings
        rest::hearing::create_hearing,
        rest::hearing::list_hearings,
        rest::hearing::get_hearing,
        rest::hearing::update_hearing,
        rest::hearing::delete_hearing,
        // Bail
        rest::bail::create_bail,
        rest::bail::list_bails,
        rest::bail::get_bail,
        rest::bail::update_bail,
        rest::bail::delete_bail,
        rest::bail::create_surety,
        rest::bail::list_sureties,
        rest::bail::get_surety,
        rest::bail::update_surety,
        rest::bail::delete_surety,
        // Appeals, decisions, remands
        rest::appeal::create_appeal,
        rest::appeal::list_appeals,
        rest::appeal::get_appeal,
        rest::appeal::update_appeal,
        rest::appeal::delete_appeal,
        rest::decision::create_decision,
        rest::decision::list_decisions,
        rest::decision::get_decision,
        rest::decision::update_decision,
        rest::decision::delete_decision,
        rest::decision::create_remand,
        rest::decision::list_remands,
        rest::decision::get_remand,
        rest::decision::update_remand,
        rest::decision::delete_remand,
        // Payments
        rest::payment::create_payment,
        rest::payment::list_payments,
        // Admin
        rest::admin::list_audit_logs,
        // Health
        health::health_check,
    ),
    components(schemas(
        AppError, AppErrorKind, MessageResponse, Role, CaseActorRole, PaymentMode,
        // Account schemas
        SignupRequest, SignupResponse, LoginRequest, LoginResponse,
        CompleteProfileRequest, CompleteProfileResponse, ProfileData, DashboardResponse,
        Lawyer, Judge, CourtRegistrar, CaseParticipant,
        LawyerProfileResponse, UpdateLawyerProfileRequest, RegistrarProfileResponse,
        JudgeProfileResponse,
        // Court schemas
        Court, CreateCourtRequest, UpdateCourtRequest, Courtroom, CreateCourtroomRequest,
        UpdateCourtroomRequest, Prosecutor, CreateProsecutorRequest,
        AssignJudgeToCourtRequest, AssignProsecutorRequest,
        // Case schemas
        Case, CreateCaseRequest, UpdateCaseRequest, AssignCaseActorRequest,
        AssignCaseActorResponse, LinkCourtRequest, LinkParticipantRequest, CaseAccessResponse,
        // Case child schemas
        Hearing, CreateHearingRequest, UpdateHearingRequest,
        Bail, CreateBailRequest, UpdateBailRequest,
        Surety, CreateSuretyRequest, UpdateSuretyRequest,
        Evidence, CreateEvidenceRequest, UpdateEvidenceRequest,
        Witness, CaseWitness, CreateCaseWitnessRequest, UpdateWitnessRequest,
        Document, CaseDocument, CreateCaseDocumentRequest, UpdateDocumentRequest,
        CaseHistory, CreateCaseHistoryRequest, UpdateCaseHistoryRequest,
        Appeal, CreateAppealRequest, UpdateAppealRequest,
        FinalDecision, CreateDecisionRequest, UpdateDecisionRequest,
        Remand, CreateRemandRequest, UpdateRemandRequest,
        // Payment and audit schemas
        PaymentRecord, CreatePaymentRequest, AuditLogEntry,
        health::HealthResponse,
    )),
    tags(
        (name = "auth", description = "Signup, login and logout"),
        (name = "profiles", description = "Role profiles and the dashboard"),
        (name = "courts", description = "Courts, prosecutors and court-side grants"),
        (name = "courtrooms", description = "Courtroom management"),
        (name = "cases", description = "Cases and case access grants"),
        (name = "evidence", description = "Evidence filed against a case"),
        (name = "witnesses", description = "Witnesses and their case statements"),
        (name = "documents", description = "Documents filed in a case"),
        (name = "case-history", description = "Actions taken on a case"),
        (name = "hearings", description = "Hearing schedule"),
        (name = "bail", description = "Bail records and sureties"),
        (name = "appeals", description = "Appeals"),
        (name = "decisions", description = "Final decisions and remands"),
        (name = "payments", description = "Lawyer payments"),
        (name = "admin", description = "Audit log"),
        (name = "health", description = "Health check endpoint")
    ),
    info(
        title = "Legal Case Management API",
        description = "Court records, case access and payments",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Build an Axum router serving the REST API at `/api/*`, `/health`, and
/// the API reference at `/docs` when the `api_docs` flag is on.
pub fn api_router(pool: Pool<Postgres>) -> Router {
    let state = AppState { pool };
    let flags = crate::config::feature_flags();

    let router = Router::new()
        .merge(rest::api_router())
        .route("/health", axum::routing::get(health::health_check))
        .with_state(state);

    if flags.api_docs {
        router.merge(Scalar::with_url("/docs", ApiDoc::openapi()))
    } else {
        router
    }
}
