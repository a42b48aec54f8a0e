use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    middleware,
    Router,
};
use serde_json::{json, Value};
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;

/// Global mutex ensuring tests run sequentially against the shared database.
/// Each test acquires this lock before truncating, preventing concurrent
/// tests from interfering with each other's data.
static TEST_MUTEX: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

const ALL_TABLES: &str = "users, sessions, admins, lawyers, judges, courts, court_registrars, \
    case_participants, courtrooms, prosecutors, judge_works_in, prosecutor_assign, cases, \
    court_access, case_lawyer_access, judge_access, case_participant_access, hearings, sureties, \
    bails, evidence, witnesses, witness_case, documents, document_case, case_history, appeals, \
    final_decisions, remands, payments, audit_log";

/// Build a test router backed by a real Postgres pool.
/// Acquires a global lock, runs migrations and truncates every table.
/// The returned `MutexGuard` must be held for the duration of the test.
pub async fn test_app() -> (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>) {
    let guard = TEST_MUTEX.lock().await;

    let _ = dotenvy::dotenv();
    if std::env::var("SESSION_SECRET").is_err() {
        std::env::set_var("SESSION_SECRET", "integration-test-session-secret");
    }

    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL must be set for tests");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    lcms_server::db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query(&format!("TRUNCATE {ALL_TABLES} RESTART IDENTITY CASCADE"))
        .execute(&pool)
        .await
        .expect("Failed to truncate");

    let state = lcms_server::db::AppState { pool: pool.clone() };
    // The permissive auth middleware resolves the session cookie; requests
    // without one still reach the handlers.
    let router = lcms_server::rest::api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            lcms_server::auth::middleware::auth_middleware,
        ))
        .with_state(state);

    (router, pool, guard)
}

/// A signed-in test user: the session cookie to send and the user id.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub cookie: String,
}

pub async fn post_json(app: &Router, uri: &str, body: Value, session: Option<&Session>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, "POST", uri, Some(body), session).await;
    (status, body)
}

pub async fn put_json(app: &Router, uri: &str, body: Value, session: Option<&Session>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, "PUT", uri, Some(body), session).await;
    (status, body)
}

pub async fn get(app: &Router, uri: &str, session: Option<&Session>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, "GET", uri, None, session).await;
    (status, body)
}

pub async fn delete(app: &Router, uri: &str, session: Option<&Session>) -> (StatusCode, Value) {
    let (status, _, body) = send(app, "DELETE", uri, None, session).await;
    (status, body)
}

/// Send a request through the router and parse the response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
    session: Option<&Session>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(session) = session {
        builder = builder.header(header::COOKIE, &session.cookie);
    }
    let req = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes)
            .unwrap_or(Value::String(String::from_utf8_lossy(&body_bytes).to_string()))
    };

    (status, headers, body)
}

/// The `name=value` pair from a `Set-Cookie` response header, ready to be
/// sent back in a `Cookie` request header.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("lcms_session="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn signup_body(email: &str, role: &str) -> Value {
    json!({
        "firstname": "Test",
        "lastname": "User",
        "email": email,
        "phoneno": "03001234567",
        "cnic": "3520112345671",
        "dob": "1990-01-15",
        "password": "correct horse",
        "role": role,
    })
}

/// Sign up a user and return its session.
pub async fn signup(app: &Router, email: &str, role: &str) -> Session {
    let (status, headers, body) =
        send(app, "POST", "/api/signup", Some(signup_body(email, role)), None).await;
    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    Session {
        user_id: body["user_id"].as_i64().expect("user_id"),
        cookie: session_cookie(&headers).expect("signup sets the session cookie"),
    }
}

/// Complete the caller's profile and return the re-issued session along
/// with the new profile id.
pub async fn complete_profile(app: &Router, session: &Session, profile_data: Value) -> (Session, i64) {
    let body = json!({ "user_id": session.user_id, "profile_data": profile_data });
    let (status, headers, body) =
        send(app, "POST", "/api/complete-profile", Some(body), Some(session)).await;
    assert_eq!(status, StatusCode::OK, "complete-profile failed: {body}");
    let session = Session {
        user_id: session.user_id,
        cookie: session_cookie(&headers).expect("profile completion re-issues the session"),
    };
    (session, body["profile_id"].as_i64().expect("profile_id"))
}

/// Sign up a lawyer with a completed profile. Returns the session and the
/// lawyer profile id.
pub async fn lawyer(app: &Router, email: &str, bar_license: i64) -> (Session, i64) {
    let session = signup(app, email, "lawyer").await;
    complete_profile(
        app,
        &session,
        json!({ "barLicense": bar_license, "experience": 6, "specialization": "Criminal" }),
    )
    .await
}

/// Sign up a judge with a completed profile.
pub async fn judge(app: &Router, email: &str) -> (Session, i64) {
    let session = signup(app, email, "judge").await;
    complete_profile(
        app,
        &session,
        json!({ "position": "Sessions Judge", "specialization": "Criminal", "experience": 12 }),
    )
    .await
}

/// Sign up an admin with a completed profile.
pub async fn admin(app: &Router, email: &str) -> (Session, i64) {
    let session = signup(app, email, "admin").await;
    complete_profile(app, &session, json!({})).await
}

pub async fn create_case(app: &Router, session: &Session, title: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/api/cases",
        json!({ "title": title, "casetype": "Criminal", "status": "Open", "filingdate": "2024-03-01" }),
        Some(session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create case failed: {body}");
    body["id"].as_i64().expect("case id")
}

pub async fn create_court(app: &Router, session: &Session, name: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/api/court",
        json!({ "courtname": name, "type": "Sessions", "location": "Lahore" }),
        Some(session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create court failed: {body}");
    body["id"].as_i64().expect("court id")
}

pub async fn link_court(app: &Router, session: &Session, case_id: i64, court_id: i64) {
    let (status, body) = post_json(
        app,
        &format!("/api/cases/{case_id}/courts"),
        json!({ "court_id": court_id }),
        Some(session),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "link court failed: {body}");
}

pub async fn count(pool: &Pool<Postgres>, sql: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(pool)
        .await
        .expect("count query")
}
