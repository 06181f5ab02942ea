/// Integration tests for the taskdock API
///
/// These tests verify the full system works end-to-end against a real
/// database (from `DATABASE_URL`):
/// - Registration and login, including the duplicate-username path
/// - Token verification (missing, garbage, expired)
/// - Task CRUD with ownership enforcement
/// - The 404-before-403 ordering on the task endpoints

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::TestContext;
use serde_json::json;
use taskdock_shared::auth::jwt::{create_token, Claims};
use taskdock_shared::models::task::Task;
use uuid::Uuid;

/// Register → duplicate register → login → wrong-password login
#[tokio::test]
async fn test_register_and_login_scenario() {
    let ctx = TestContext::new().await.unwrap();
    let username = common::unique_username("alice");

    // First registration succeeds
    let (status, body) = ctx
        .request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "username": username, "password": "pw1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_string());

    // Same username again is rejected, even with a different password
    let (status, body) = ctx
        .request(
            "POST",
            "/auth/register",
            None,
            Some(json!({ "username": username, "password": "pw2" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    // Login with the right password yields a token
    let (status, body) = ctx
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": username, "password": "pw1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["access_token"].is_string());

    // Wrong password is a 401
    let (status, _) = ctx
        .request(
            "POST",
            "/auth/login",
            None,
            Some(json!({ "username": username, "password": "wrong" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Missing fields come back as one validation error per field
#[tokio::test]
async fn test_register_validation_lists_every_field() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx
        .request("POST", "/auth/register", None, Some(json!({})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation error");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

/// The protected smoke-test endpoint names the authenticated user
#[tokio::test]
async fn test_protected_endpoint() {
    let ctx = TestContext::new().await.unwrap();
    let (username, token) = common::register_and_login(&ctx, "prot").await;

    let (status, body) = ctx
        .request("GET", "/auth/protected", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Protected resource accessed by {}", username)
    );

    // No token at all
    let (status, _) = ctx.request("GET", "/auth/protected", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// create followed by get returns matching fields and owner = creator
#[tokio::test]
async fn test_create_then_get_roundtrip() {
    let ctx = TestContext::new().await.unwrap();
    let (username, token) = common::register_and_login(&ctx, "creator").await;

    let id = common::create_task(&ctx, &token, "buy milk", "pending").await;

    let (status, body) = ctx
        .request("GET", &format!("/tasks/{}", id), Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "buy milk");
    assert_eq!(body["status"], "pending");
    assert_eq!(body["user"], username);
}

/// A task created by A is invisible to B, and B gets 403 on direct access
#[tokio::test]
async fn test_cross_user_isolation() {
    let ctx = TestContext::new().await.unwrap();
    let (_alice, alice_token) = common::register_and_login(&ctx, "alice").await;
    let (_bob, bob_token) = common::register_and_login(&ctx, "bob").await;

    let id = common::create_task(&ctx, &alice_token, "secret plan", "pending").await;

    // Invisible to bob's list
    let (status, body) = ctx.request("GET", "/tasks", Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert!(!listed.contains(&id.as_str()));

    // Direct access by bob is forbidden, for all three verbs
    let uri = format!("/tasks/{}", id);
    let (status, _) = ctx.request("GET", &uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx
        .request("PUT", &uri, Some(&bob_token), Some(json!({ "status": "done" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = ctx.request("DELETE", &uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // And the task is untouched for alice
    let (status, body) = ctx.request("GET", &uri, Some(&alice_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
}

/// Nonexistent ids yield 404, never 403, for all three verbs
#[tokio::test]
async fn test_nonexistent_id_is_not_found() {
    let ctx = TestContext::new().await.unwrap();
    let (_user, token) = common::register_and_login(&ctx, "seeker").await;

    let uri = format!("/tasks/{}", Uuid::new_v4());

    let (status, _) = ctx.request("GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx
        .request("PUT", &uri, Some(&token), Some(json!({ "status": "done" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = ctx.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// A syntactically invalid id is a 400, not a 404
#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let ctx = TestContext::new().await.unwrap();
    let (_user, token) = common::register_and_login(&ctx, "parser").await;

    let (status, body) = ctx
        .request("GET", "/tasks/not-a-valid-id", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid task ID format");
}

/// Partial update merges supplied fields and leaves the rest alone
#[tokio::test]
async fn test_update_partial_merge() {
    let ctx = TestContext::new().await.unwrap();
    let (_user, token) = common::register_and_login(&ctx, "editor").await;

    let id = common::create_task(&ctx, &token, "buy milk", "pending").await;
    let uri = format!("/tasks/{}", id);

    // Change only the status
    let (status, body) = ctx
        .request("PUT", &uri, Some(&token), Some(json!({ "status": "done" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task updated");

    let (_, body) = ctx.request("GET", &uri, Some(&token), None).await;
    assert_eq!(body["status"], "done");
    assert_eq!(body["title"], "buy milk");

    // Re-sending the stored values is a success, but an unchanged one
    let (status, body) = ctx
        .request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "title": "buy milk", "status": "done" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task unchanged");

    // So is an empty payload
    let (status, body) = ctx.request("PUT", &uri, Some(&token), Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task unchanged");
}

/// An owner key in the update payload never changes the stored owner
#[tokio::test]
async fn test_update_cannot_change_owner() {
    let ctx = TestContext::new().await.unwrap();
    let (username, token) = common::register_and_login(&ctx, "immut").await;

    let id = common::create_task(&ctx, &token, "buy milk", "pending").await;
    let uri = format!("/tasks/{}", id);

    let (status, _) = ctx
        .request(
            "PUT",
            &uri,
            Some(&token),
            Some(json!({ "status": "done", "owner": "mallory", "user": "mallory" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = ctx.request("GET", &uri, Some(&token), None).await;
    assert_eq!(body["user"], username);
    assert_eq!(body["status"], "done");

    // And the stored row agrees
    let stored = Task::find_by_id(&ctx.db, Uuid::parse_str(&id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.owner.as_deref(), Some(username.as_str()));
}

/// Delete succeeds once; the second call reports NotFound
#[tokio::test]
async fn test_delete_is_not_idempotent() {
    let ctx = TestContext::new().await.unwrap();
    let (_user, token) = common::register_and_login(&ctx, "reaper").await;

    let id = common::create_task(&ctx, &token, "doomed", "pending").await;
    let uri = format!("/tasks/{}", id);

    let (status, body) = ctx.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Task deleted");

    let (status, _) = ctx.request("DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// Tokens past their validity window are rejected on every task endpoint
#[tokio::test]
async fn test_expired_token_is_rejected() {
    let ctx = TestContext::new().await.unwrap();
    let (username, _token) = common::register_and_login(&ctx, "expired").await;

    // Forge a token for the same identity that expired an hour ago
    let claims = Claims::with_expiration(username, Duration::seconds(-3600));
    let stale = create_token(&claims, &ctx.config.jwt.secret).unwrap();

    let (status, body) = ctx.request("GET", "/tasks", Some(&stale), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token has expired");
}

/// Requests without credentials, or with garbage tokens, are 401s
#[tokio::test]
async fn test_authentication_required() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.request("GET", "/tasks", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization token");

    let (status, _) = ctx
        .request("GET", "/tasks", Some("garbage-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// Creating a task with empty fields reports every violation
#[tokio::test]
async fn test_create_task_validation() {
    let ctx = TestContext::new().await.unwrap();
    let (_user, token) = common::register_and_login(&ctx, "validator").await;

    let (status, body) = ctx
        .request(
            "POST",
            "/tasks",
            Some(&token),
            Some(json!({ "title": "", "status": "" })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation error");
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

/// The welcome and health endpoints are public
#[tokio::test]
async fn test_public_endpoints() {
    let ctx = TestContext::new().await.unwrap();

    let (status, body) = ctx.request("GET", "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to Task Manager API!");

    let (status, body) = ctx.request("GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");
}
