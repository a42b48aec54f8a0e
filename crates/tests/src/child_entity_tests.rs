use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{self, delete, get, post_json, put_json, Session};

async fn setup(app: &axum::Router) -> (Session, i64) {
    let (session, _) = common::lawyer(app, "l@example.com", 42).await;
    let case_id = common::create_case(app, &session, "State v. Children").await;
    (session, case_id)
}

fn ids(body: &Value) -> Vec<i64> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn hearings_are_listed_in_date_order() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, case_id) = setup(&app).await;

    let (status, later) = post_json(
        &app,
        "/api/hearings",
        json!({ "case_id": case_id, "hearing_date": "2024-06-10", "venue": "Courtroom 2" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let (_, earlier) = post_json(
        &app,
        "/api/hearings",
        json!({ "case_id": case_id, "hearing_date": "2024-05-02", "hearing_time": "10:30:00" }),
        Some(&session),
    )
    .await;

    let (status, body) = get(&app, &format!("/api/hearings?case_id={case_id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&body),
        vec![earlier["id"].as_i64().unwrap(), later["id"].as_i64().unwrap()]
    );

    let id = later["id"].as_i64().unwrap();
    let (status, body) = put_json(
        &app,
        &format!("/api/hearings/{id}"),
        json!({ "remarks": "Adjourned" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["remarks"], "Adjourned");
    assert_eq!(body["venue"], "Courtroom 2");

    let (status, body) = delete(&app, &format!("/api/hearings/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Hearing deleted successfully");
    let (status, _) = get(&app, &format!("/api/hearings/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn hearing_for_missing_case_is_not_found() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = setup(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/hearings",
        json!({ "case_id": 8080, "hearing_date": "2024-06-10" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Case not found");

    let (status, body) = post_json(&app, "/api/hearings", json!({ "venue": "Hall" }), Some(&session)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["case_id"].is_string());
    assert!(body["field_errors"]["hearing_date"].is_string());
}

#[tokio::test]
async fn bail_requires_an_existing_surety() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, case_id) = setup(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/bails",
        json!({ "case_id": case_id, "surety_id": 12, "amount": 50000.0 }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Surety 12 not found");

    let (status, surety) = post_json(
        &app,
        "/api/surety",
        json!({ "cnic": "3520144444444", "phone": "03009876543", "firstname": "Kamran" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let surety_id = surety["id"].as_i64().unwrap();

    let (status, bail) = post_json(
        &app,
        "/api/bails",
        json!({ "case_id": case_id, "surety_id": surety_id, "amount": 50000.0, "status": "Granted" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(bail["amount"], 50000.0);

    let (status, body) = post_json(
        &app,
        "/api/bails",
        json!({ "case_id": case_id, "surety_id": surety_id, "amount": -1.0 }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["amount"].is_string());

    // NUMERIC(10, 2) tops out below 1e8.
    let (status, body) = put_json(
        &app,
        &format!("/api/bails/{}", bail["id"]),
        json!({ "amount": 1.0e9 }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["amount"].is_string());

    let (_, body) = get(&app, "/api/bails?status=granted", Some(&session)).await;
    assert_eq!(ids(&body), vec![bail["id"].as_i64().unwrap()]);

    let (status, body) = delete(&app, &format!("/api/surety/{surety_id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Surety deleted successfully");
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM bails").await, 0);
}

#[tokio::test]
async fn sureties_can_be_searched_and_patched() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = setup(&app).await;
    let (_, surety) = post_json(
        &app,
        "/api/surety",
        json!({ "cnic": "3520155555555", "phone": "03001112223", "firstname": "Zainab", "lastname": "Shah" }),
        Some(&session),
    )
    .await;
    let id = surety["id"].as_i64().unwrap();

    let (_, body) = get(&app, "/api/surety?name=zain", Some(&session)).await;
    assert_eq!(ids(&body), vec![id]);

    let (status, body) = put_json(
        &app,
        &format!("/api/surety/{id}"),
        json!({ "address": "Johar Town" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["address"], "Johar Town");
    assert_eq!(body["cnic"], "3520155555555");

    let (status, _) = post_json(&app, "/api/surety", json!({ "firstname": "Nobody" }), Some(&session)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn evidence_lives_under_its_case() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, case_id) = setup(&app).await;
    let uri = format!("/api/cases/{case_id}/evidence");

    let (status, evidence) = post_json(
        &app,
        &uri,
        json!({ "evidence_type": "CCTV footage", "description": "Gate camera", "submitted_date": "2024-03-02" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(evidence["case_id"], case_id);
    let id = evidence["id"].as_i64().unwrap();

    let (status, body) = get(&app, &uri, Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![id]);

    let (status, body) = put_json(
        &app,
        &format!("/api/evidence/{id}"),
        json!({ "file_path": "/evidence/cam1.mp4" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file_path"], "/evidence/cam1.mp4");
    assert_eq!(body["evidence_type"], "CCTV footage");

    let (status, _) = post_json(&app, "/api/cases/999/evidence", json!({ "evidence_type": "Knife" }), Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = delete(&app, &format!("/api/evidence/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Evidence deleted successfully");
}

#[tokio::test]
async fn documents_are_filed_against_a_case() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, case_id) = setup(&app).await;
    let uri = format!("/api/cases/{case_id}/documents");

    let (status, document) = post_json(
        &app,
        &uri,
        json!({ "document_title": "FIR copy", "document_type": "FIR", "submission_date": "2024-03-03" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(document["case_id"], case_id);
    assert_eq!(document["submission_date"], "2024-03-03");
    let id = document["id"].as_i64().unwrap();

    let (status, body) = get(&app, &uri, Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["document_title"], "FIR copy");

    let (status, body) = put_json(
        &app,
        &format!("/api/documents/{id}"),
        json!({ "document_title": "FIR certified copy" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document_title"], "FIR certified copy");
    assert_eq!(body["document_type"], "FIR");

    // Documents only linked to the deleted case go with it.
    delete(&app, &format!("/api/cases/{case_id}"), Some(&session)).await;
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM documents").await, 0);
}

#[tokio::test]
async fn history_is_kept_in_action_date_order() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, case_id) = setup(&app).await;
    let uri = format!("/api/cases/{case_id}/history");

    let (_, second) = post_json(
        &app,
        &uri,
        json!({ "action_date": "2024-04-01", "action_taken": "Charge framed" }),
        Some(&session),
    )
    .await;
    let (_, first) = post_json(
        &app,
        &uri,
        json!({ "action_date": "2024-03-15", "action_taken": "Case registered" }),
        Some(&session),
    )
    .await;

    let (status, body) = get(&app, &uri, Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&body),
        vec![first["id"].as_i64().unwrap(), second["id"].as_i64().unwrap()]
    );

    let (status, body) = post_json(&app, &uri, json!({ "remarks": "no action" }), Some(&session)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["action_taken"].is_string());

    let id = second["id"].as_i64().unwrap();
    let (status, body) = put_json(
        &app,
        &format!("/api/case-history/{id}"),
        json!({ "remarks": "Accused pleaded not guilty" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["action_taken"], "Charge framed");

    let (status, body) = delete(&app, &format!("/api/case-history/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "History entry deleted successfully");
}

#[tokio::test]
async fn appeals_and_decisions_follow_the_case() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, case_id) = setup(&app).await;

    let (status, decision) = post_json(
        &app,
        "/api/decisions",
        json!({ "case_id": case_id, "verdict": "Convicted", "decision_date": "2024-07-01" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let decision_id = decision["id"].as_i64().unwrap();

    let (status, appeal) = post_json(
        &app,
        "/api/appeals",
        json!({ "case_id": case_id, "appeal_date": "2024-07-20", "status": "Pending" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let appeal_id = appeal["id"].as_i64().unwrap();

    let (status, body) = put_json(
        &app,
        &format!("/api/appeals/{appeal_id}"),
        json!({ "status": "Decided", "decision": "Upheld", "decision_date": "2024-09-01" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["decision"], "Upheld");
    assert_eq!(body["appeal_date"], "2024-07-20");

    let (_, body) = get(&app, "/api/appeals?status=decided", Some(&session)).await;
    assert_eq!(ids(&body), vec![appeal_id]);

    let (_, body) = get(&app, &format!("/api/decisions?case_id={case_id}"), Some(&session)).await;
    assert_eq!(ids(&body), vec![decision_id]);

    let (status, body) = post_json(&app, "/api/decisions", json!({ "case_id": case_id }), Some(&session)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["verdict"].is_string());

    let (status, body) = put_json(
        &app,
        &format!("/api/decisions/{decision_id}"),
        json!({ "verdict": "" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["verdict"].is_string());

    let (status, _) = put_json(
        &app,
        &format!("/api/appeals/{appeal_id}"),
        json!({ "status": "S".repeat(101) }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = delete(&app, &format!("/api/decisions/{decision_id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Decision deleted successfully");

    let (status, body) = get(&app, &format!("/api/appeals/{}", appeal_id + 1), Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], format!("Appeal {} not found", appeal_id + 1));
}

#[tokio::test]
async fn remand_period_must_not_end_before_it_starts() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, case_id) = setup(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/remands",
        json!({ "case_id": case_id, "start_date": "2024-05-10", "end_date": "2024-05-01" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid remand period");
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM remands").await, 0);

    let (status, remand) = post_json(
        &app,
        "/api/remands",
        json!({
            "case_id": case_id,
            "start_date": "2024-05-01",
            "end_date": "2024-05-14",
            "remand_type": "Physical",
            "reason": "Recovery of weapon"
        }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = remand["id"].as_i64().unwrap();

    // A one-sided patch is still held to the stored start date.
    let (status, body) = put_json(
        &app,
        &format!("/api/remands/{id}"),
        json!({ "end_date": "2024-04-01" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "ValidationError");

    let (status, body) = put_json(
        &app,
        &format!("/api/remands/{id}"),
        json!({ "end_date": "2024-05-21" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["end_date"], "2024-05-21");
    assert_eq!(body["remand_type"], "Physical");

    let (status, body) = delete(&app, &format!("/api/remands/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Remand deleted successfully");
}
