use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, get, post_json, send, session_cookie, signup, signup_body, Session};

#[tokio::test]
async fn signup_creates_user_and_sets_session_cookie() {
    let (app, pool, _guard) = common::test_app().await;

    let (status, headers, body) = send(
        &app,
        "POST",
        "/api/signup",
        Some(signup_body("ayesha@example.com", "Court Registrar")),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");
    assert_eq!(body["role"], "CourtRegistrar");
    let cookie = session_cookie(&headers).expect("session cookie");
    assert!(cookie.starts_with("lcms_session="));

    let stored: String = sqlx::query_scalar("SELECT role FROM users WHERE id = $1")
        .bind(body["user_id"].as_i64().unwrap())
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, "CourtRegistrar");
}

#[tokio::test]
async fn password_is_stored_hashed() {
    let (app, pool, _guard) = common::test_app().await;
    let session = signup(&app, "hash@example.com", "lawyer").await;

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM users WHERE id = $1")
        .bind(session.user_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(hash.starts_with("$argon2"));
    assert!(!hash.contains("correct horse"));
}

#[tokio::test]
async fn duplicate_email_is_rejected_regardless_of_case() {
    let (app, _pool, _guard) = common::test_app().await;
    signup(&app, "dup@example.com", "lawyer").await;

    let (status, body) =
        post_json(&app, "/api/signup", signup_body("DUP@Example.com", "judge"), None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "Conflict");
    assert_eq!(body["message"], "An account with this email already exists");
}

#[tokio::test]
async fn unknown_role_is_rejected() {
    let (app, pool, _guard) = common::test_app().await;

    let (status, body) =
        post_json(&app, "/api/signup", signup_body("clerk@example.com", "clerk"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationError");
    assert_eq!(body["message"], "Invalid role");
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM users").await, 0);
}

#[tokio::test]
async fn signup_with_invalid_email_reports_field_error() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, body) =
        post_json(&app, "/api/signup", signup_body("not-an-email", "lawyer"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["email"].is_string());
}

#[tokio::test]
async fn login_returns_profile_and_new_session() {
    let (app, _pool, _guard) = common::test_app().await;
    signup(&app, "login@example.com", "judge").await;

    let (status, headers, body) = send(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "email": "Login@Example.com", "password": "correct horse" })),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["email"], "login@example.com");
    assert_eq!(body["role"], "Judge");
    assert!(session_cookie(&headers).is_some());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let (app, _pool, _guard) = common::test_app().await;
    signup(&app, "known@example.com", "lawyer").await;

    let (wrong_status, wrong_body) = post_json(
        &app,
        "/api/login",
        json!({ "email": "known@example.com", "password": "battery staple" }),
        None,
    )
    .await;
    let (unknown_status, unknown_body) = post_json(
        &app,
        "/api/login",
        json!({ "email": "nobody@example.com", "password": "correct horse" }),
        None,
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body, unknown_body);
    assert_eq!(wrong_body["message"], "Invalid email or password");
}

#[tokio::test]
async fn logout_revokes_the_session() {
    let (app, _pool, _guard) = common::test_app().await;
    let session = signup(&app, "bye@example.com", "lawyer").await;

    let (status, _) = get(&app, "/api/dashboard", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, headers, body) = send(&app, "POST", "/api/logout", None, Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");
    let cleared = headers
        .get(axum::http::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(cleared.contains("Max-Age=0"));

    let (status, body) = get(&app, "/api/dashboard", Some(&session)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "Unauthorized");
}

#[tokio::test]
async fn protected_routes_require_a_session() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, _) = get(&app, "/api/cases", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let forged = Session {
        user_id: 1,
        cookie: "lcms_session=not-a-token".to_string(),
    };
    let (status, _) = get(&app, "/api/cases", Some(&forged)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
