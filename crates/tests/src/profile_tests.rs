use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, get, post_json, put_json, signup};

#[tokio::test]
async fn lawyer_completes_profile_once() {
    let (app, pool, _guard) = common::test_app().await;
    let session = signup(&app, "lawyer@example.com", "lawyer").await;

    let (status, body) = post_json(
        &app,
        "/api/complete-profile",
        json!({
            "user_id": session.user_id,
            "profile_data": { "barLicense": "4521", "experience": "7", "specialization": "Tax" }
        }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile completed successfully");
    assert_eq!(body["role"], "Lawyer");
    assert_eq!(
        common::count(&pool, "SELECT COUNT(*) FROM lawyers WHERE bar_license_no = 4521").await,
        1
    );

    // The old session was replaced, so sign in again for the retry.
    let (_, headers, _) = common::send(
        &app,
        "POST",
        "/api/login",
        Some(json!({ "email": "lawyer@example.com", "password": "correct horse" })),
        None,
    )
    .await;
    let session = common::Session {
        user_id: session.user_id,
        cookie: common::session_cookie(&headers).expect("login cookie"),
    };

    let (status, body) = post_json(
        &app,
        "/api/complete-profile",
        json!({ "profile_data": { "barLicense": 9999, "experience": 1, "specialization": "Tax" } }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Profile already exists for this user");
}

#[tokio::test]
async fn missing_lawyer_fields_are_listed() {
    let (app, _pool, _guard) = common::test_app().await;
    let session = signup(&app, "partial@example.com", "lawyer").await;

    let (status, body) = post_json(
        &app,
        "/api/complete-profile",
        json!({ "profile_data": { "specialization": "Family" } }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationError");
    assert!(body["field_errors"]["barLicense"].is_string());
    assert!(body["field_errors"]["experience"].is_string());
    assert!(body["field_errors"].get("specialization").is_none());
}

#[tokio::test]
async fn duplicate_bar_license_is_a_conflict() {
    let (app, _pool, _guard) = common::test_app().await;
    common::lawyer(&app, "first@example.com", 777).await;
    let session = signup(&app, "second@example.com", "lawyer").await;

    let (status, body) = post_json(
        &app,
        "/api/complete-profile",
        json!({ "profile_data": { "barLicense": 777, "experience": 2, "specialization": "Civil" } }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "A lawyer with this bar license number already exists");
}

#[tokio::test]
async fn cannot_complete_another_users_profile() {
    let (app, _pool, _guard) = common::test_app().await;
    let victim = signup(&app, "victim@example.com", "judge").await;
    let intruder = signup(&app, "intruder@example.com", "judge").await;

    let (status, body) = post_json(
        &app,
        "/api/complete-profile",
        json!({
            "user_id": victim.user_id,
            "profile_data": { "position": "Judge", "specialization": "Civil", "experience": 3 }
        }),
        Some(&intruder),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "Forbidden");
}

#[tokio::test]
async fn participant_profile_requires_address() {
    let (app, pool, _guard) = common::test_app().await;
    let session = signup(&app, "party@example.com", "CaseParticipant").await;

    let (status, body) = post_json(
        &app,
        "/api/complete-profile",
        json!({ "profile_data": { "address": "  " } }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["address"].is_string());

    common::complete_profile(&app, &session, json!({ "address": "12 Mall Road" })).await;
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM case_participants").await, 1);
}

#[tokio::test]
async fn dashboard_shows_lawyer_details() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "dash@example.com", 3141).await;

    let (status, body) = get(&app, "/api/dashboard", Some(&session)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "username": "Test User",
            "role": "Lawyer",
            "specialization": "Criminal",
            "barlicenseno": 3141
        })
    );
}

#[tokio::test]
async fn dashboard_for_other_roles_omits_lawyer_fields() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::judge(&app, "bench@example.com").await;

    let (status, body) = get(&app, "/api/dashboard", Some(&session)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "username": "Test User", "role": "Judge" }));
}

#[tokio::test]
async fn lawyer_profile_can_be_read_and_patched() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "patch@example.com", 100).await;

    let (status, body) = get(&app, "/api/lawyerprofile", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["barLicense"], 100);
    assert_eq!(body["experience"], 6);
    assert_eq!(body["email"], "patch@example.com");

    let (status, body) = put_json(
        &app,
        "/api/lawyerprofile",
        json!({ "specialization": "Corporate" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["specialization"], "Corporate");
    assert_eq!(body["barLicense"], 100);
    assert_eq!(body["experience"], 6);

    let (status, body) = put_json(
        &app,
        "/api/lawyerprofile",
        json!({ "experience": 250 }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["experience"].is_string());
}

#[tokio::test]
async fn lawyer_profile_missing_for_unprofiled_user() {
    let (app, _pool, _guard) = common::test_app().await;
    let session = signup(&app, "fresh@example.com", "lawyer").await;

    let (status, body) = get(&app, "/api/lawyerprofile", Some(&session)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Profile not found");
}

#[tokio::test]
async fn registrar_and_judge_profiles() {
    let (app, _pool, _guard) = common::test_app().await;
    let registrar = signup(&app, "registrar@example.com", "court_registrar").await;
    let (registrar, _) =
        common::complete_profile(&app, &registrar, json!({ "position": "Deputy Registrar" })).await;
    let court_id = common::create_court(&app, &registrar, "District Court").await;

    let (status, body) = get(&app, "/api/registrarprofile", Some(&registrar)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position"], "Deputy Registrar");
    assert_eq!(body["courtid"], court_id);

    let (judge, _) = common::judge(&app, "judge@example.com").await;
    let (status, body) = get(&app, "/api/judgeprofile", Some(&judge)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["position"], "Sessions Judge");
    assert_eq!(body["experience"], 12);
}
