/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations run against `DATABASE_URL`)
/// - App construction
/// - Account registration/login helpers driven through the real endpoints
/// - Request/response helpers for driving the router

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::PgPool;
use taskdock_api::app::{build_router, AppState};
use taskdock_api::config::Config;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context against the configured database
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration (DATABASE_URL, JWT_SECRET from env/.env)
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.connection_string()).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Sends a request and returns (status, parsed JSON body)
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }
}

/// Generates a username that cannot collide across test runs
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Registers an account through the API, panicking on failure
pub async fn register(ctx: &TestContext, username: &str, password: &str) {
    let (status, body) = ctx
        .request(
            "POST",
            "/auth/register",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await;

    assert_eq!(
        status,
        StatusCode::CREATED,
        "register should succeed: {}",
        body
    );
}

/// Logs in through the API and returns the access token
pub async fn login(ctx: &TestContext, username: &str, password: &str) -> String {
    let (status, body) = ctx
        .request(
            "POST",
            "/auth/login",
            None,
            Some(serde_json::json!({ "username": username, "password": password })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "login should succeed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

/// Registers a fresh account and returns (username, token)
pub async fn register_and_login(ctx: &TestContext, prefix: &str) -> (String, String) {
    let username = unique_username(prefix);
    register(ctx, &username, "pw1").await;
    let token = login(ctx, &username, "pw1").await;
    (username, token)
}

/// Creates a task through the API and returns its id
pub async fn create_task(ctx: &TestContext, token: &str, title: &str, status: &str) -> String {
    let (code, body) = ctx
        .request(
            "POST",
            "/tasks",
            Some(token),
            Some(serde_json::json!({ "title": title, "status": status })),
        )
        .await;

    assert_eq!(code, StatusCode::CREATED, "create should succeed: {}", body);
    body["id"].as_str().unwrap().to_string()
}
