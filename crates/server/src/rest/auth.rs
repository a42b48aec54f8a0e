use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    Json,
};
use sqlx::{Pool, Postgres};

use shared_types::{
    AppError, LoginRequest, LoginResponse, MessageResponse, Role, SignupRequest, SignupResponse,
};

use crate::auth::{self, cookies, extractors::MaybeAuth, password};
use crate::db;
use crate::error_convert::ValidateRequest;
use crate::repo;

type WithCookie<T> = (StatusCode, [(header::HeaderName, HeaderValue); 1], Json<T>);

/// POST /api/signup
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "User created and signed in", body = SignupResponse),
        (status = 400, description = "Invalid role or fields", body = AppError),
        (status = 409, description = "Email already registered", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, body), fields(email = %body.email))]
pub async fn signup(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<SignupRequest>,
) -> Result<WithCookie<SignupResponse>, AppError> {
    body.validate_request()?;
    let role: Role = body.role.parse()?;

    let digest = password::hash_password(&body.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let mut tx = db::begin(&pool).await?;
    let user = repo::user::create(&mut *tx, &body, role, &digest).await?;
    let cookie = auth::issue_session(&mut tx, user.id, &user.email, role).await?;
    db::commit(tx).await?;

    tracing::info!(user_id = user.id, role = %role, "user signed up");

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(SignupResponse {
            message: "User created successfully".to_string(),
            user_id: user.id,
            role,
        }),
    ))
}

/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponse),
        (status = 401, description = "Invalid email or password", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, body), fields(email = %body.email))]
pub async fn login(
    State(pool): State<Pool<Postgres>>,
    Json(body): Json<LoginRequest>,
) -> Result<WithCookie<LoginResponse>, AppError> {
    // Unknown email and wrong password produce the same response and both
    // pay for one Argon2 verification.
    let Some(user) = repo::user::find_by_email(&pool, &body.email).await? else {
        password::verify_dummy(&body.password);
        return Err(AppError::invalid_credentials());
    };

    let verified = password::verify_password(&body.password, &user.password_hash).unwrap_or(false);
    if !verified {
        tracing::info!(user_id = user.id, "login rejected");
        return Err(AppError::invalid_credentials());
    }

    let role = user
        .role()
        .ok_or_else(|| AppError::internal(format!("User {} has an unknown role", user.id)))?;

    let mut tx = db::begin(&pool).await?;
    let cookie = auth::issue_session(&mut tx, user.id, &user.email, role).await?;
    db::commit(tx).await?;

    tracing::info!(user_id = user.id, role = %role, "user logged in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "Login successful".to_string(),
            email: user.email,
            role,
        }),
    ))
}

/// POST /api/logout
///
/// Idempotent: succeeds without a session and always clears the cookie.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 200, description = "Signed out", body = MessageResponse)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, auth))]
pub async fn logout(
    State(pool): State<Pool<Postgres>>,
    auth: MaybeAuth,
) -> Result<WithCookie<MessageResponse>, AppError> {
    if let MaybeAuth(Some(claims)) = auth {
        repo::session::revoke(&pool, &claims.sid).await?;
        tracing::info!(user_id = claims.sub, "user logged out");
    }

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookies::build_clear_cookie()?)],
        Json(MessageResponse::new("Logged out successfully")),
    ))
}
