//! End-to-end tests for the HTTP API
//!
//! Each test drives the full router over an in-memory store: register,
//! login, create and triage tickets, and check that every failure maps
//! to the documented status and body.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use smart_ticket::api::{AppState, router};
use smart_ticket::config::Config;
use smart_ticket::core::{Role, User};
use smart_ticket::engine::TicketEngine;
use smart_ticket::identity::{IdentityService, TokenSigner};
use smart_ticket::storage::MemoryStorage;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const JWT_SECRET: &str = "integration-test-secret-0123456789abcdef";
const ADMIN_EMAIL: &str = "root@companya.example";
const ADMIN_PASSWORD: &str = "admin-pw-123456";

fn app() -> Router {
    app_with_storage(Arc::new(MemoryStorage::new()))
}

fn app_with_storage(storage: Arc<MemoryStorage>) -> Router {
    let identity = IdentityService::new(storage.clone(), TokenSigner::new(JWT_SECRET, 60));
    let engine = TicketEngine::new(storage);
    router(AppState::new(identity, engine, Config::default()))
}

/// Router plus an admin account already provisioned in the store
async fn app_with_admin() -> Router {
    let storage = Arc::new(MemoryStorage::new());
    let identity = IdentityService::new(storage.clone(), TokenSigner::new(JWT_SECRET, 60));
    identity
        .create_admin("Root", ADMIN_EMAIL, ADMIN_PASSWORD, "CompanyA")
        .await
        .unwrap();
    app_with_storage(storage)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, name: &str, email: &str, company: &str) -> (StatusCode, Value) {
    let body = json!({
        "name": name,
        "email": email,
        "password": "user-pw-123456",
        "company": company,
    });
    send(app, json_request("POST", "/auth/register", None, &body)).await
}

async fn login(app: &Router, email: &str, password: &str) -> (StatusCode, Value) {
    let body = json!({ "email": email, "password": password });
    send(app, json_request("POST", "/auth/login", None, &body)).await
}

/// Register a fresh user and return a usable token
async fn register_and_login(app: &Router, name: &str, email: &str, company: &str) -> String {
    let (status, _) = register(app, name, email, company).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = login(app, email, "user-pw-123456").await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn admin_token(app: &Router) -> String {
    let (status, body) = login(app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

async fn create_ticket(app: &Router, token: &str, subject: &str) -> Value {
    let body = json!({
        "subject": subject,
        "description": format!("Description for {subject}"),
        "urgency": "medium",
    });
    let (status, body) = send(app, json_request("POST", "/tickets", Some(token), &body)).await;
    assert_eq!(status, StatusCode::OK);
    body
}

fn timestamp(body: &Value, key: &str) -> DateTime<Utc> {
    body[key].as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn test_register_and_login_flow() {
    let app = app();

    let (status, body) = register(&app, "Ann", "ann@companya.example", "CompanyA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User registered successfully");

    let (status, body) = login(&app, "ann@companya.example", "user-pw-123456").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], "ann@companya.example");
    assert_eq!(body["user"]["name"], "Ann");
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"]["userId"].as_str().is_some());
    assert!(body["user"].get("password").is_none());

    // the issued token authenticates follow-up calls
    let token = body["token"].as_str().unwrap();
    let (status, body) = send(&app, get_request("/tickets/me", Some(token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = app();

    let (status, _) = register(&app, "Ann", "ann@companya.example", "CompanyA").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = register(&app, "Imposter", "ann@companya.example", "CompanyB").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "Email already registered");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = app();
    register(&app, "Ann", "ann@companya.example", "CompanyA").await;

    let (unknown_status, unknown_body) = login(&app, "ghost@companya.example", "user-pw-123456").await;
    let (wrong_status, wrong_body) = login(&app, "ann@companya.example", "bad-password").await;

    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_body, wrong_body);
    assert_eq!(wrong_body["detail"], "Invalid email or password");
}

#[tokio::test]
async fn test_registration_validation() {
    let app = app();

    let cases = [
        json!({"name": "Ann", "email": "not-an-email", "password": "pw-123456", "company": "CompanyA"}),
        json!({"name": "  ", "email": "ann@companya.example", "password": "pw-123456", "company": "CompanyA"}),
        json!({"name": "Ann", "email": "ann@companya.example", "password": "", "company": "CompanyA"}),
        json!({"name": "Ann", "email": "ann@companya.example", "password": "pw-123456", "company": "CompanyZ"}),
    ];
    for case in &cases {
        let (status, _) = send(&app, json_request("POST", "/auth/register", None, case)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "case: {case}");
    }

    // rejected registrations leave no account behind
    let (status, _) = login(&app, "ann@companya.example", "pw-123456").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_ticket_creation_defaults() {
    let app = app();
    let token = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;

    let body = json!({
        "subject": "Laptop will not boot",
        "description": "Black screen since this morning",
        "urgency": "high",
    });
    let (status, ticket) = send(&app, json_request("POST", "/tickets", Some(&token), &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ticket["subject"], "Laptop will not boot");
    assert_eq!(ticket["urgency"], "high");
    assert_eq!(ticket["category"], "General");
    assert_eq!(ticket["priority"], "Medium");
    assert_eq!(ticket["status"], "open");
    assert_eq!(ticket["company"], "CompanyA");
    assert_eq!(ticket["adminSuggestion"], Value::Null);
    assert_eq!(timestamp(&ticket, "createdAt"), timestamp(&ticket, "updatedAt"));
    assert!(ticket["ticketId"].as_str().is_some());
}

#[tokio::test]
async fn test_ticket_creation_keeps_category_and_rejects_blank_fields() {
    let app = app();
    let token = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;

    let body = json!({
        "subject": "VPN drops hourly",
        "description": "Connection resets on the dot",
        "urgency": "critical",
        "category": "Network",
    });
    let (status, ticket) = send(&app, json_request("POST", "/tickets", Some(&token), &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ticket["category"], "Network");

    let blank_subject = json!({"subject": " ", "description": "d", "urgency": "low"});
    let (status, _) = send(&app, json_request("POST", "/tickets", Some(&token), &blank_subject)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let bad_urgency = json!({"subject": "s", "description": "d", "urgency": "catastrophic"});
    let (status, _) = send(&app, json_request("POST", "/tickets", Some(&token), &bad_urgency)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_detail_visibility_rules() {
    let app = app_with_admin().await;
    let ann = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;
    let bob = register_and_login(&app, "Bob", "bob@companyb.example", "CompanyB").await;
    let admin = admin_token(&app).await;

    let ticket = create_ticket(&app, &ann, "Broken badge reader").await;
    let uri = format!("/tickets/{}", ticket["ticketId"].as_str().unwrap());

    let (status, owner_view) = send(&app, get_request(&uri, Some(&ann))).await;
    assert_eq!(status, StatusCode::OK);

    let (status, admin_view) = send(&app, get_request(&uri, Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    // owner and admin receive identical content
    assert_eq!(owner_view, admin_view);
    assert_eq!(owner_view["description"], "Description for Broken badge reader");

    let (status, body) = send(&app, get_request(&uri, Some(&bob))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Not authorized to view this ticket");
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_read_the_same() {
    let app = app();
    let token = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;

    let unknown = format!("/tickets/{}", uuid::Uuid::new_v4());
    let (status, body) = send(&app, get_request(&unknown, Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Ticket not found");

    let (status, body) = send(&app, get_request("/tickets/not-a-uuid", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Ticket not found");
}

#[tokio::test]
async fn test_own_listing_is_scoped_and_newest_first() {
    let app = app();
    let ann = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;
    let bob = register_and_login(&app, "Bob", "bob@companyb.example", "CompanyB").await;

    create_ticket(&app, &ann, "first").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    create_ticket(&app, &bob, "theirs").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    create_ticket(&app, &ann, "second").await;

    let (status, body) = send(&app, get_request("/tickets/me", Some(&ann))).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["subject"], "second");
    assert_eq!(list[1]["subject"], "first");
    // summaries omit detail-only fields
    assert!(list[0].get("description").is_none());
    assert!(list[0].get("company").is_none());
}

#[tokio::test]
async fn test_admin_listing_crosses_companies() {
    let app = app_with_admin().await;
    let ann = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;
    let bob = register_and_login(&app, "Bob", "bob@companyb.example", "CompanyB").await;
    let admin = admin_token(&app).await;

    create_ticket(&app, &ann, "from A").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    create_ticket(&app, &bob, "from B").await;

    let (status, body) = send(&app, get_request("/tickets", Some(&admin))).await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["subject"], "from B");
    assert_eq!(list[1]["subject"], "from A");

    let (status, body) = send(&app, get_request("/tickets", Some(&ann))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Admin access required");
}

#[tokio::test]
async fn test_admin_update_normalizes_pending_and_advances_updated_at() {
    let app = app_with_admin().await;
    let ann = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;
    let admin = admin_token(&app).await;

    let ticket = create_ticket(&app, &ann, "Disk full").await;
    let id = ticket["ticketId"].as_str().unwrap();
    let uri = format!("/tickets/{id}/admin-update");
    tokio::time::sleep(Duration::from_millis(5)).await;

    let patch = json!({
        "priority": "High",
        "status": "pending",
        "adminSuggestion": "Clear the build cache",
    });
    let (status, updated) = send(&app, json_request("PATCH", &uri, Some(&admin), &patch)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["priority"], "High");
    // the pending alias is stored and returned as in_progress
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["adminSuggestion"], "Clear the build cache");
    assert_eq!(updated["urgency"], ticket["urgency"]);
    assert_eq!(updated["createdAt"], ticket["createdAt"]);
    assert!(timestamp(&updated, "updatedAt") > timestamp(&ticket, "updatedAt"));

    // the patch is what the owner now sees
    let (_, detail) = send(&app, get_request(&format!("/tickets/{id}"), Some(&ann))).await;
    assert_eq!(detail["status"], "in_progress");
    assert_eq!(detail["adminSuggestion"], "Clear the build cache");
}

#[tokio::test]
async fn test_admin_update_is_sparse() {
    let app = app_with_admin().await;
    let ann = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;
    let admin = admin_token(&app).await;

    let ticket = create_ticket(&app, &ann, "Flaky monitor").await;
    let uri = format!("/tickets/{}/admin-update", ticket["ticketId"].as_str().unwrap());

    let (_, first) = send(
        &app,
        json_request("PATCH", &uri, Some(&admin), &json!({"adminSuggestion": "Swap the cable"})),
    )
    .await;
    assert_eq!(first["status"], "open");
    assert_eq!(first["priority"], "Medium");

    // a later patch leaves the earlier suggestion in place
    let (_, second) = send(
        &app,
        json_request("PATCH", &uri, Some(&admin), &json!({"status": "resolved"})),
    )
    .await;
    assert_eq!(second["status"], "resolved");
    assert_eq!(second["adminSuggestion"], "Swap the cable");
}

#[tokio::test]
async fn test_empty_patch_reads_as_not_found() {
    let app = app_with_admin().await;
    let ann = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;
    let admin = admin_token(&app).await;

    let ticket = create_ticket(&app, &ann, "Slow wifi").await;
    let id = ticket["ticketId"].as_str().unwrap();
    let uri = format!("/tickets/{id}/admin-update");

    let (status, body) = send(&app, json_request("PATCH", &uri, Some(&admin), &json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Ticket not found");

    // nothing was written
    let (_, detail) = send(&app, get_request(&format!("/tickets/{id}"), Some(&ann))).await;
    assert_eq!(detail["updatedAt"], ticket["updatedAt"]);

    let ghost = format!("/tickets/{}/admin-update", uuid::Uuid::new_v4());
    let (status, body) = send(
        &app,
        json_request("PATCH", &ghost, Some(&admin), &json!({"priority": "Low"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Ticket not found");
}

#[tokio::test]
async fn test_admin_update_requires_admin() {
    let app = app();
    let ann = register_and_login(&app, "Ann", "ann@companya.example", "CompanyA").await;

    let ticket = create_ticket(&app, &ann, "Sticky keys").await;
    let uri = format!("/tickets/{}/admin-update", ticket["ticketId"].as_str().unwrap());

    let (status, body) = send(
        &app,
        json_request("PATCH", &uri, Some(&ann), &json!({"priority": "Low"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Admin access required");

    // the role gate answers before any id lookup
    let (status, _) = send(
        &app,
        json_request("PATCH", "/tickets/not-a-uuid/admin-update", Some(&ann), &json!({"priority": "Low"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_token_failures_share_one_body() {
    let app = app();
    register(&app, "Ann", "ann@companya.example", "CompanyA").await;

    // missing header
    let (status, missing) = send(&app, get_request("/tickets/me", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // garbage token
    let (status, garbage) = send(&app, get_request("/tickets/me", Some("not.a.token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // well-formed but expired
    let holder = User::new(
        "Ann",
        "ann@companya.example",
        "irrelevant",
        "CompanyA",
        Role::User,
    );
    let expired = TokenSigner::new(JWT_SECRET, -5).issue(&holder).unwrap();
    let (status, expired_body) = send(&app, get_request("/tickets/me", Some(&expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // valid signature but no account behind the email
    let ghost = User::new(
        "Ghost",
        "ghost@companyc.example",
        "irrelevant",
        "CompanyC",
        Role::User,
    );
    let orphan = TokenSigner::new(JWT_SECRET, 60).issue(&ghost).unwrap();
    let (status, orphan_body) = send(&app, get_request("/tickets/me", Some(&orphan))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    assert_eq!(missing, garbage);
    assert_eq!(missing, expired_body);
    assert_eq!(missing, orphan_body);
    assert_eq!(missing["detail"], "Invalid or expired token");
}

#[tokio::test]
async fn test_wrong_secret_token_rejected() {
    let app = app();
    register(&app, "Ann", "ann@companya.example", "CompanyA").await;

    let holder = User::new(
        "Ann",
        "ann@companya.example",
        "irrelevant",
        "CompanyA",
        Role::User,
    );
    let forged = TokenSigner::new("some-other-secret-0123456789abcdef", 60)
        .issue(&holder)
        .unwrap();

    let (status, body) = send(&app, get_request("/tickets/me", Some(&forged))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Invalid or expired token");
}
