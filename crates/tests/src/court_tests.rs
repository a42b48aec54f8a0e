use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, delete, get, post_json, put_json, signup};

async fn registrar(app: &axum::Router, email: &str) -> common::Session {
    let session = signup(app, email, "CourtRegistrar").await;
    common::complete_profile(app, &session, json!({ "position": "Registrar" }))
        .await
        .0
}

#[tokio::test]
async fn registrar_court_is_linked_on_create() {
    let (app, _pool, _guard) = common::test_app().await;
    let session = registrar(&app, "reg@example.com").await;

    let (status, body) = get(&app, "/api/court", Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Registrar is not assigned to any court");

    let court_id = common::create_court(&app, &session, "Lahore High Court").await;

    let (status, body) = get(&app, "/api/court", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "id": court_id, "courtname": "Lahore High Court", "type": "Sessions", "location": "Lahore" })
    );
}

#[tokio::test]
async fn registrar_without_profile_cannot_create_court() {
    let (app, pool, _guard) = common::test_app().await;
    let session = signup(&app, "noprofile@example.com", "CourtRegistrar").await;

    let (status, body) = post_json(
        &app,
        "/api/court",
        json!({ "courtname": "Orphan Court", "type": "Civil", "location": "Multan" }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "CourtRegistrar profile not found");
    // The court insert rolled back with the failed registrar lookup.
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM courts").await, 0);
}

#[tokio::test]
async fn court_requires_every_field() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::admin(&app, "admin@example.com").await;

    let (status, body) = post_json(&app, "/api/court", json!({ "courtname": "X" }), Some(&session)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["location"].is_string());
}

#[tokio::test]
async fn courts_can_be_filtered_patched_and_deleted() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, _) = common::admin(&app, "admin@example.com").await;
    let high = common::create_court(&app, &session, "High Court").await;
    common::create_court(&app, &session, "Family Court").await;

    let (status, body) = get(&app, "/api/courts?name=high", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["courtname"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["High Court"]);

    let (status, body) = put_json(
        &app,
        &format!("/api/courts/{high}"),
        json!({ "location": "Islamabad" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["location"], "Islamabad");
    assert_eq!(body["courtname"], "High Court");

    let (status, _) = post_json(
        &app,
        "/api/courtrooms",
        json!({ "court_id": high, "courtroom_no": 1, "capacity": 40 }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = delete(&app, &format!("/api/courts/{high}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Court deleted successfully");
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM courtrooms").await, 0);

    let (status, _) = get(&app, &format!("/api/courts/{high}"), Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn courtroom_capacity_must_not_be_negative() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::admin(&app, "admin@example.com").await;
    let court_id = common::create_court(&app, &session, "Civil Court").await;

    let (status, body) = post_json(
        &app,
        "/api/courtrooms",
        json!({ "court_id": court_id, "courtroom_no": 2, "capacity": -5 }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["capacity"].is_string());

    let (status, body) = post_json(
        &app,
        "/api/courtrooms",
        json!({ "court_id": court_id, "courtroom_no": 2, "capacity": 30, "availability": true }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let courtroom_id = body["id"].as_i64().unwrap();

    let (status, body) = get(
        &app,
        &format!("/api/courtrooms?court_id={court_id}"),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = put_json(
        &app,
        &format!("/api/courtrooms/{courtroom_id}"),
        json!({ "availability": false }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["availability"], false);
    assert_eq!(body["capacity"], 30);
}

#[tokio::test]
async fn judge_is_assigned_to_court_once() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::admin(&app, "admin@example.com").await;
    let court_id = common::create_court(&app, &session, "Sessions Court").await;
    let (_, judge_id) = common::judge(&app, "judge@example.com").await;
    let uri = format!("/api/courts/{court_id}/judges");

    let (status, body) = post_json(&app, &uri, json!({ "judge_id": judge_id }), Some(&session)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Judge assigned to court");

    let (status, body) = post_json(&app, &uri, json!({ "judge_id": judge_id }), Some(&session)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Judge already works in this court");

    let (status, body) = post_json(&app, &uri, json!({ "judge_id": judge_id + 100 }), Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Judge not found");
}

#[tokio::test]
async fn prosecutors_are_created_and_assigned() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::admin(&app, "admin@example.com").await;
    let court_id = common::create_court(&app, &session, "Anti-Terrorism Court").await;

    let (status, body) = post_json(
        &app,
        "/api/prosecutors",
        json!({ "name": "Imran Ali", "experience": 9, "status": "Active" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let prosecutor_id = body["id"].as_i64().unwrap();

    let (status, body) = get(&app, "/api/prosecutors", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Imran Ali");

    let uri = format!("/api/courts/{court_id}/prosecutors");
    let (status, body) =
        post_json(&app, &uri, json!({ "prosecutor_id": prosecutor_id }), Some(&session)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Prosecutor assigned to court");

    let (status, _) =
        post_json(&app, &uri, json!({ "prosecutor_id": prosecutor_id }), Some(&session)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = post_json(
        &app,
        "/api/courts/999/prosecutors",
        json!({ "prosecutor_id": prosecutor_id }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Court not found");
}

#[tokio::test]
async fn court_update_rejects_blank_and_oversized_fields() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;
    let court_id = common::create_court(&app, &session, "District Court").await;

    let (status, body) = put_json(
        &app,
        &format!("/api/courts/{court_id}"),
        json!({ "courtname": "" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationError");
    assert!(body["field_errors"]["courtname"].is_string());

    let (status, _) = put_json(
        &app,
        &format!("/api/courts/{court_id}"),
        json!({ "location": "L".repeat(300) }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, &format!("/api/courts/{court_id}"), Some(&session)).await;
    assert_eq!(body["courtname"], "District Court");
    assert_eq!(body["location"], "Lahore");
}
