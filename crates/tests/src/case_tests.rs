use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, delete, get, post_json, put_json, signup};

#[tokio::test]
async fn create_and_fetch_case() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;

    let (status, body) = post_json(
        &app,
        "/api/cases",
        json!({
            "title": "State v. Rahim",
            "description": "Theft of livestock",
            "casetype": "Criminal",
            "status": "Open",
            "filingdate": "2024-02-11"
        }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_i64().unwrap();

    let (status, body) = get(&app, &format!("/api/cases/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "State v. Rahim");
    assert_eq!(body["description"], "Theft of livestock");
    assert_eq!(body["filingdate"], "2024-02-11");
}

#[tokio::test]
async fn case_without_title_is_rejected() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;

    let (status, body) =
        post_json(&app, "/api/cases", json!({ "casetype": "Civil" }), Some(&session)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["title"], "title is required");
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM cases").await, 0);
}

#[tokio::test]
async fn whitespace_title_is_rejected() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;

    let (status, body) =
        post_json(&app, "/api/cases", json!({ "title": "   " }), Some(&session)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["title"].is_string());
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM cases").await, 0);

    let id = common::create_case(&app, &session, "State v. Blank").await;
    let (status, _) =
        put_json(&app, &format!("/api/cases/{id}"), json!({ "title": " \t " }), Some(&session)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&app, &format!("/api/cases/{id}"), Some(&session)).await;
    assert_eq!(body["title"], "State v. Blank");
}

#[tokio::test]
async fn title_filter_treats_wildcards_literally() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;
    common::create_case(&app, &session, "State v. Doe").await;
    common::create_case(&app, &session, "Khan v. Ali").await;
    let discounted = common::create_case(&app, &session, "Re 50% levy_appeal").await;

    for query in ["%25", "_", "50%25", "levy_"] {
        let (status, body) = get(&app, &format!("/api/cases?title={query}"), Some(&session)).await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<i64> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![discounted], "title={query}");
    }

    let (_, body) = get(&app, "/api/cases?title=v._", Some(&session)).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn list_filters_by_status_type_and_title() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;
    common::create_case(&app, &session, "State v. Akram").await;
    common::create_case(&app, &session, "Bank v. Akram Traders").await;
    let closed = common::create_case(&app, &session, "State v. Bilal").await;
    put_json(
        &app,
        &format!("/api/cases/{closed}"),
        json!({ "status": "Closed", "casetype": "Civil" }),
        Some(&session),
    )
    .await;

    let titles = |body: &serde_json::Value| -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|c| c["title"].as_str().unwrap().to_string())
            .collect()
    };

    let (_, body) = get(&app, "/api/cases?status=closed", Some(&session)).await;
    assert_eq!(titles(&body), vec!["State v. Bilal"]);

    let (_, body) = get(&app, "/api/cases?casetype=CRIMINAL", Some(&session)).await;
    assert_eq!(titles(&body), vec!["State v. Akram", "Bank v. Akram Traders"]);

    let (_, body) = get(&app, "/api/cases?title=akram", Some(&session)).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = get(&app, "/api/cases?limit=1&offset=1", Some(&session)).await;
    assert_eq!(titles(&body), vec!["Bank v. Akram Traders"]);
}

#[tokio::test]
async fn update_is_a_merge_patch() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;
    let id = common::create_case(&app, &session, "State v. Nadeem").await;

    let (status, body) = put_json(
        &app,
        &format!("/api/cases/{id}"),
        json!({ "status": "Adjourned" }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Adjourned");
    assert_eq!(body["title"], "State v. Nadeem");
    assert_eq!(body["casetype"], "Criminal");
    assert_eq!(body["filingdate"], "2024-03-01");

    let (status, _) = put_json(&app, &format!("/api/cases/{id}"), json!({ "title": "" }), Some(&session)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_case_is_not_found() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;

    let (status, body) = get(&app, "/api/cases/4040", Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Case not found");

    let (status, _) = put_json(&app, "/api/cases/4040", json!({ "status": "Closed" }), Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = delete(&app, "/api/cases/4040", Some(&session)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_case_removes_its_children() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, lawyer_id) = common::lawyer(&app, "l@example.com", 1).await;
    let id = common::create_case(&app, &session, "State v. Cascade").await;
    let court_id = common::create_court(&app, &session, "Sessions Court").await;
    common::link_court(&app, &session, id, court_id).await;

    let participant = signup(&app, "p@example.com", "caseparticipant").await;
    let (_, participant_id) =
        common::complete_profile(&app, &participant, json!({ "address": "House 9, Gulberg" })).await;

    let (_, surety) = post_json(
        &app,
        "/api/surety",
        json!({ "cnic": "3520155555555", "phone": "03001112223" }),
        Some(&session),
    )
    .await;

    let children = [
        ("/api/hearings".to_string(), json!({ "case_id": id, "hearing_date": "2024-04-01" })),
        (
            "/api/bails".to_string(),
            json!({ "case_id": id, "surety_id": surety["id"], "amount": 1000.0 }),
        ),
        (format!("/api/cases/{id}/evidence"), json!({ "evidence_type": "Photograph" })),
        (
            format!("/api/cases/{id}/witnesses"),
            json!({ "firstname": "Sana", "lastname": "Iqbal", "cnic": "3520100000001" }),
        ),
        (format!("/api/cases/{id}/documents"), json!({ "document_title": "Charge sheet" })),
        (format!("/api/cases/{id}/history"), json!({ "action_taken": "Case registered" })),
        ("/api/appeals".to_string(), json!({ "case_id": id, "appeal_date": "2024-06-01" })),
        ("/api/decisions".to_string(), json!({ "case_id": id, "verdict": "Acquitted" })),
        (
            "/api/remands".to_string(),
            json!({ "case_id": id, "start_date": "2024-03-02", "end_date": "2024-03-09" }),
        ),
        (format!("/api/cases/{id}/participants"), json!({ "participant_id": participant_id })),
        (format!("/api/cases/{id}/assign"), json!({ "assignee_id": lawyer_id, "role": "lawyer" })),
    ];
    for (uri, body) in children {
        let (status, response) = post_json(&app, &uri, body, Some(&session)).await;
        assert!(status.is_success(), "{uri} failed: {response}");
    }

    let (status, body) = delete(&app, &format!("/api/cases/{id}"), Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Case deleted successfully");

    for table in [
        "hearings",
        "bails",
        "evidence",
        "witness_case",
        "document_case",
        "documents",
        "case_history",
        "appeals",
        "final_decisions",
        "remands",
        "court_access",
        "case_lawyer_access",
        "case_participant_access",
    ] {
        assert_eq!(
            common::count(&pool, &format!("SELECT COUNT(*) FROM {table}")).await,
            0,
            "{table} should be empty"
        );
    }
    // Witnesses, sureties and courts are not owned by the case.
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM witnesses").await, 1);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM sureties").await, 1);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM courts").await, 1);
}

#[tokio::test]
async fn payments_survive_case_deletion() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;
    let case_id = common::create_case(&app, &session, "State v. Ledger").await;
    let court_id = common::create_court(&app, &session, "Banking Court").await;
    common::link_court(&app, &session, case_id, court_id).await;

    let (status, _) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Filing fee", "balance": 1500.0, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    delete(&app, &format!("/api/cases/{case_id}"), Some(&session)).await;

    let (status, body) = get(&app, "/api/payments", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert!(body[0]["case_id"].is_null());
    assert!(body[0]["casename"].is_null());
    assert_eq!(body[0]["court_id"], court_id);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM payments").await, 1);
}

#[tokio::test]
async fn case_changes_are_audited() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;
    let id = common::create_case(&app, &session, "State v. Audit").await;
    put_json(&app, &format!("/api/cases/{id}"), json!({ "status": "Closed" }), Some(&session)).await;
    delete(&app, &format!("/api/cases/{id}"), Some(&session)).await;

    let actions: Vec<String> =
        sqlx::query_scalar("SELECT action_type FROM audit_log WHERE entity_type = 'case' ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(actions, vec!["create", "update", "delete"]);
    // Non-admin actors leave admin_id empty.
    assert_eq!(
        common::count(&pool, "SELECT COUNT(*) FROM audit_log WHERE admin_id IS NOT NULL").await,
        0
    );
}
