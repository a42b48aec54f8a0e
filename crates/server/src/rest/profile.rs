use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, CompleteProfileRequest, CompleteProfileResponse, DashboardResponse,
    JudgeProfileResponse, LawyerProfileResponse, RegistrarProfileResponse, Role,
    UpdateLawyerProfileRequest, User,
};

use crate::auth::{self, extractors::AuthRequired};
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

async fn current_user(pool: &Pool<Postgres>, user_id: i64) -> Result<User, AppError> {
    repo::user::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// POST /api/complete-profile
///
/// Creates the role profile row for the signed-in user and re-issues the
/// session. Partial role data is rejected and a second completion conflicts.
#[utoipa::path(
    post,
    path = "/api/complete-profile",
    request_body = CompleteProfileRequest,
    responses(
        (status = 200, description = "Profile created", body = CompleteProfileResponse),
        (status = 400, description = "Missing role fields", body = AppError),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 403, description = "user_id is not the caller", body = AppError),
        (status = 404, description = "User not found", body = AppError),
        (status = 409, description = "Profile already exists", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn complete_profile(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<CompleteProfileRequest>,
) -> Result<(StatusCode, [(header::HeaderName, HeaderValue); 1], Json<CompleteProfileResponse>), AppError> {
    let AuthRequired(claims) = auth;
    let user_id = body.user_id.unwrap_or(claims.sub);
    if user_id != claims.sub {
        return Err(AppError::forbidden("Cannot complete another user's profile"));
    }

    let user = current_user(&pool, user_id).await?;
    let role = user
        .role()
        .ok_or_else(|| AppError::internal(format!("User {} has an unknown role", user.id)))?;
    let profile = body.profile_data.into_role_profile(role)?;

    let mut tx = db::begin(&pool).await?;
    let profile_id = repo::profile::create(&mut *tx, user.id, &profile).await?;
    repo::session::revoke(&mut *tx, &claims.sid).await?;
    let cookie = auth::issue_session(&mut tx, user.id, &user.email, role).await?;
    db::commit(tx).await?;

    tracing::info!(user_id = user.id, role = %role, profile_id, "profile completed");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(CompleteProfileResponse {
            message: "Profile completed successfully".to_string(),
            user_id: user.id,
            role,
            profile_id,
        }),
    ))
}

/// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Signed-in user summary", body = DashboardResponse),
        (status = 401, description = "Not signed in", body = AppError)
    ),
    tag = "profiles"
)]
pub async fn dashboard(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<DashboardResponse>, AppError> {
    let user = current_user(&pool, claims.sub).await?;

    let mut response = DashboardResponse {
        username: user.display_name(),
        role: claims.role,
        specialization: None,
        barlicenseno: None,
    };

    if claims.role == Role::Lawyer {
        if let Some(lawyer) = repo::profile::lawyer_for_user(&pool, user.id).await? {
            response.specialization = lawyer.specialization;
            response.barlicenseno = Some(lawyer.bar_license_no);
        }
    }

    Ok(Json(response))
}

/// GET /api/lawyerprofile
#[utoipa::path(
    get,
    path = "/api/lawyerprofile",
    responses(
        (status = 200, description = "Lawyer profile", body = LawyerProfileResponse),
        (status = 401, description = "Not signed in", body = AppError),
        (status = 404, description = "Profile not found", body = AppError)
    ),
    tag = "profiles"
)]
pub async fn get_lawyer_profile(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<LawyerProfileResponse>, AppError> {
    let user = current_user(&pool, claims.sub).await?;
    let lawyer = repo::profile::lawyer_for_user(&pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

    Ok(Json(LawyerProfileResponse {
        first_name: user.firstname,
        last_name: user.lastname,
        email: user.email,
        phone: user.phoneno,
        cnic: user.cnic,
        dob: user.dob,
        specialization: lawyer.specialization,
        bar_license: lawyer.bar_license_no,
        experience: lawyer.experience_years,
    }))
}

/// PUT /api/lawyerprofile
#[utoipa::path(
    put,
    path = "/api/lawyerprofile",
    request_body = UpdateLawyerProfileRequest,
    responses(
        (status = 200, description = "Lawyer profile updated", body = LawyerProfileResponse),
        (status = 400, description = "Invalid experience", body = AppError),
        (status = 404, description = "Profile not found", body = AppError),
        (status = 409, description = "Bar license already in use", body = AppError)
    ),
    tag = "profiles"
)]
#[tracing::instrument(skip(pool, auth, body))]
pub async fn update_lawyer_profile(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Json(body): Json<UpdateLawyerProfileRequest>,
) -> Result<Json<LawyerProfileResponse>, AppError> {
    body.validate_request()?;
    let AuthRequired(claims) = auth;
    let experience = match body.experience {
        Some(years) if !(0..=100).contains(&years) => {
            let mut field_errors = std::collections::HashMap::new();
            field_errors.insert(
                "experience".to_string(),
                "experience must be between 0 and 100".to_string(),
            );
            return Err(AppError::validation("Invalid experience", field_errors));
        }
        Some(years) => Some(years as i32),
        None => None,
    };

    let user = current_user(&pool, claims.sub).await?;

    let mut tx = db::begin(&pool).await?;
    let lawyer = repo::profile::lawyer_for_user(&mut *tx, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;
    let lawyer = repo::profile::update_lawyer(&mut *tx, lawyer.id, &body, experience).await?;
    db::commit(tx).await?;

    Ok(Json(LawyerProfileResponse {
        first_name: user.firstname,
        last_name: user.lastname,
        email: user.email,
        phone: user.phoneno,
        cnic: user.cnic,
        dob: user.dob,
        specialization: lawyer.specialization,
        bar_license: lawyer.bar_license_no,
        experience: lawyer.experience_years,
    }))
}

/// GET /api/registrarprofile
#[utoipa::path(
    get,
    path = "/api/registrarprofile",
    responses(
        (status = 200, description = "Registrar profile", body = RegistrarProfileResponse),
        (status = 404, description = "Profile not found", body = AppError)
    ),
    tag = "profiles"
)]
pub async fn get_registrar_profile(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<RegistrarProfileResponse>, AppError> {
    let user = current_user(&pool, claims.sub).await?;
    let registrar = repo::profile::registrar_for_user(&pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

    Ok(Json(RegistrarProfileResponse {
        first_name: user.firstname,
        last_name: user.lastname,
        email: user.email,
        phone: user.phoneno,
        cnic: user.cnic,
        dob: user.dob,
        position: registrar.position,
        court_id: registrar.court_id,
    }))
}

/// GET /api/judgeprofile
#[utoipa::path(
    get,
    path = "/api/judgeprofile",
    responses(
        (status = 200, description = "Judge profile", body = JudgeProfileResponse),
        (status = 404, description = "Profile not found", body = AppError)
    ),
    tag = "profiles"
)]
pub async fn get_judge_profile(
    State(pool): State<Pool<Postgres>>,
    AuthRequired(claims): AuthRequired,
) -> Result<Json<JudgeProfileResponse>, AppError> {
    let user = current_user(&pool, claims.sub).await?;
    let judge = repo::profile::judge_for_user(&pool, user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Profile not found"))?;

    Ok(Json(JudgeProfileResponse {
        first_name: user.firstname,
        last_name: user.lastname,
        email: user.email,
        phone: user.phoneno,
        position: judge.position,
        specialization: judge.specialization,
        experience: judge.experience_years,
        appointment_date: judge.appointment_date,
    }))
}
