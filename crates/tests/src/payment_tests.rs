use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{self, get, post_json, Session};

/// A lawyer with a case that has court access.
async fn billable_case(app: &axum::Router) -> (Session, i64, i64, i64) {
    let (session, lawyer_id) = common::lawyer(app, "billing@example.com", 2024).await;
    let case_id = common::create_case(app, &session, "State v. Invoice").await;
    let court_id = common::create_court(app, &session, "Civil Court Lahore").await;
    common::link_court(app, &session, case_id, court_id).await;
    (session, lawyer_id, case_id, court_id)
}

#[tokio::test]
async fn payment_is_recorded_against_case_court_and_lawyer() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, lawyer_id, case_id, court_id) = billable_case(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({
            "case_id": case_id,
            "purpose": "Court fee",
            "balance": 2500.5,
            "mode": "Credit/Debit card",
            "paymenttype": "Fee",
            "paymentdate": "2024-03-10"
        }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["case_id"], case_id);
    assert_eq!(body["court_id"], court_id);
    assert_eq!(body["lawyer_id"], lawyer_id);
    assert_eq!(body["casename"], "State v. Invoice");
    assert_eq!(body["mode"], "Card");
    assert_eq!(body["balance"], 2500.5);
    assert_eq!(body["paymentdate"], "2024-03-10");
}

#[tokio::test]
async fn case_can_be_named_by_title() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _, case_id, _) = billable_case(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "casename": "State v. Invoice", "purpose": "Copy fee", "balance": 300, "mode": "cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["case_id"], case_id);
    assert_eq!(body["mode"], "Cash");
}

#[tokio::test]
async fn unknown_case_is_not_found() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, _, _, _) = billable_case(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "casename": "No Such Case", "purpose": "Fee", "balance": 10, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Case not found");
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM payments").await, 0);
}

#[tokio::test]
async fn case_without_court_access_cannot_be_billed() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _) = common::lawyer(&app, "l@example.com", 1).await;
    let case_id = common::create_case(&app, &session, "State v. Courtless").await;

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Fee", "balance": 10, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Court access entry not found");
}

#[tokio::test]
async fn only_lawyers_record_payments() {
    let (app, _pool, _guard) = common::test_app().await;
    let (_, _, case_id, _) = billable_case(&app).await;
    let (judge, _) = common::judge(&app, "j@example.com").await;

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Fee", "balance": 10, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&judge),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Lawyer not found");

    let (status, body) = get(&app, "/api/payments", Some(&judge)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Lawyer not found");
}

#[tokio::test]
async fn invalid_payment_input_is_rejected() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _, case_id, _) = billable_case(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Fee", "balance": 10, "mode": "Cheque", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["mode"].is_string());

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Fee", "balance": -5, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["balance"].is_string());

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "purpose": "Fee", "balance": 5, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["case_id"].is_string());

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Fee", "balance": 1.0e9, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["balance"].is_string());

    let (status, _) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "casename": "State v. Invoice", "purpose": "Fee", "balance": 5, "mode": "Cash", "paymenttype": "Fee" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn payments_are_listed_newest_first() {
    let (app, _pool, _guard) = common::test_app().await;
    let (session, _, case_id, _) = billable_case(&app).await;

    for (purpose, date) in [("Filing", "2024-01-05"), ("Hearing", "2024-02-20"), ("Copies", "2024-01-30")] {
        let (status, _) = post_json(
            &app,
            "/api/payments",
            json!({ "case_id": case_id, "purpose": purpose, "balance": 100, "mode": "OnlineTransfer", "paymenttype": "Fee", "paymentdate": date }),
            Some(&session),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    // Another lawyer's payments stay out of the list.
    let (other, _) = common::lawyer(&app, "other@example.com", 9).await;
    let (_, body) = get(&app, "/api/payments", Some(&other)).await;
    assert_eq!(body, json!([]));

    let (status, body) = get(&app, "/api/payments", Some(&session)).await;
    assert_eq!(status, StatusCode::OK);
    let purposes: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["purpose"].as_str().unwrap())
        .collect();
    assert_eq!(purposes, vec!["Hearing", "Copies", "Filing"]);

    let (_, body) = get(&app, "/api/payments?limit=1", Some(&session)).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn payment_type_is_required() {
    let (app, pool, _guard) = common::test_app().await;
    let (session, _, case_id, _) = billable_case(&app).await;

    let (status, body) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Fee", "balance": 10, "mode": "Cash" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field_errors"]["paymenttype"], "paymenttype is required");

    let (status, _) = post_json(
        &app,
        "/api/payments",
        json!({ "case_id": case_id, "purpose": "Fee", "balance": 10, "mode": "Cash", "paymenttype": "" }),
        Some(&session),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::count(&pool, "SELECT COUNT(*) FROM payments").await, 0);
}
