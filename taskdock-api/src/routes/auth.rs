/// Authentication endpoints
///
/// This module provides the identity service endpoints:
/// - Registration
/// - Login
/// - Protected smoke-test
///
/// # Endpoints
///
/// - `POST /auth/register` - Register new account
/// - `POST /auth/login` - Login and get an access token
/// - `GET /auth/protected` - Verify a token works

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};
use taskdock_shared::{
    auth::{jwt, middleware::AuthContext, password},
    models::user::{CreateUser, User},
};
use validator::Validate;

/// Register request
///
/// Fields are optional at the serde layer so that a missing field surfaces
/// as a structured validation error (listing every violation) instead of a
/// body-rejection.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username
    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username must not be empty")
    )]
    pub username: Option<String>,

    /// Password
    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password must not be empty")
    )]
    pub password: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// Confirmation message
    pub message: String,

    /// New user ID
    pub id: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username
    #[validate(
        required(message = "username is required"),
        length(min = 1, message = "username must not be empty")
    )]
    pub username: Option<String>,

    /// Password
    #[validate(
        required(message = "password is required"),
        length(min = 1, message = "password must not be empty")
    )]
    pub password: Option<String>,
}

/// Login response
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// Access token (1 hour)
    pub access_token: String,
}

/// Protected response
#[derive(Debug, Serialize)]
pub struct ProtectedResponse {
    /// Greeting naming the authenticated user
    pub message: String,
}

/// Register a new account
///
/// # Endpoint
///
/// ```text
/// POST /auth/register
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Response
///
/// ```json
/// { "message": "user registered successfully", "id": "uuid" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty fields, or username already exists
/// - `500 Internal Server Error`: store failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate()?;
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    // Reject duplicates up front; the unique constraint on username is the
    // backstop for two concurrent registrations.
    if User::find_by_username(&state.db, &username).await?.is_some() {
        return Err(ApiError::DuplicateUsername(username));
    }

    let password_hash = password::hash_password(&password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username,
            password_hash,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "user registered successfully".to_string(),
            id: user.id.to_string(),
        }),
    ))
}

/// Login and receive an access token
///
/// Verifies the credentials and issues a signed token binding the username
/// and a 1 hour expiry. An unknown username and a wrong password produce the
/// same error.
///
/// # Endpoint
///
/// ```text
/// POST /auth/login
/// Content-Type: application/json
///
/// { "username": "alice", "password": "pw1" }
/// ```
///
/// # Response
///
/// ```json
/// { "access_token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: missing/empty fields
/// - `401 Unauthorized`: invalid credentials
/// - `500 Internal Server Error`: store failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    req.validate()?;
    let username = req.username.unwrap_or_default();
    let password = req.password.unwrap_or_default();

    let user = User::find_by_username(&state.db, &username)
        .await?
        .ok_or(ApiError::InvalidCredentials)?;

    let valid = password::verify_password(&password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::InvalidCredentials);
    }

    let claims = jwt::Claims::new(user.username);
    let access_token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(LoginResponse { access_token }))
}

/// Protected smoke-test endpoint
///
/// Confirms that a bearer token verifies and shows which identity it carries.
///
/// # Errors
///
/// - `401 Unauthorized`: missing, invalid, or expired token
pub async fn protected(
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<ProtectedResponse>> {
    Ok(Json(ProtectedResponse {
        message: format!("Protected resource accessed by {}", auth.username),
    }))
}
