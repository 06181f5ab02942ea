/// Error handling for the API server
///
/// This module provides the unified error type every handler returns and the
/// single boundary translator that maps error kinds to HTTP responses. All
/// handlers return `Result<T, ApiError>`; any otherwise-unhandled store or
/// runtime failure is converted to `Internal` by the `From<sqlx::Error>`
/// conversion rather than crashing the request.
///
/// # Error body
///
/// Every failure serializes as a JSON object with a human-readable `error`
/// field and an optional `details` value:
///
/// ```json
/// { "error": "validation error", "details": [{ "field": "title", "message": "..." }] }
/// ```
///
/// # Example
///
/// ```ignore
/// use taskdock_api::error::ApiResult;
/// use axum::Json;
///
/// async fn handler() -> ApiResult<Json<serde_json::Value>> {
///     let data = fetch_data().await?;
///     Ok(Json(data))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
///
/// One variant per kind in the error taxonomy; the status code is decided in
/// exactly one place (`IntoResponse`).
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing input fields (400)
    Validation(Vec<ValidationErrorDetail>),

    /// Task id is not a syntactically valid identifier (400)
    MalformedId(String),

    /// Username already taken at registration (400)
    DuplicateUsername(String),

    /// Unknown user or wrong password (401)
    InvalidCredentials,

    /// No Authorization header on the request (401)
    MissingToken,

    /// Malformed or unverifiable token (401)
    InvalidToken(String),

    /// Token past its expiry (401)
    ExpiredToken,

    /// Owner mismatch on an existing task (403)
    Forbidden(String),

    /// No such resource (404)
    NotFound(String),

    /// Unexpected store/runtime failure (500)
    Internal(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,

    /// Optional structured details (per-field violations, diagnosis string)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::MalformedId(msg) => write!(f, "Malformed id: {}", msg),
            ApiError::DuplicateUsername(name) => write!(f, "Duplicate username: {}", name),
            ApiError::InvalidCredentials => write!(f, "Invalid credentials"),
            ApiError::MissingToken => write!(f, "Missing token"),
            ApiError::InvalidToken(msg) => write!(f, "Invalid token: {}", msg),
            ApiError::ExpiredToken => write!(f, "Expired token"),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation error".to_string(),
                serde_json::to_value(errors).ok(),
            ),
            ApiError::MalformedId(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::DuplicateUsername(_) => (
                StatusCode::BAD_REQUEST,
                "username already exists".to_string(),
                None,
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
                None,
            ),
            ApiError::MissingToken => (
                StatusCode::UNAUTHORIZED,
                "Missing authorization token".to_string(),
                None,
            ),
            ApiError::InvalidToken(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            ApiError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                "Token has expired".to_string(),
                None,
            ),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    Some(serde_json::Value::String(msg)),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// This is the catch-all fault boundary for store failures: anything not
/// recognized becomes `Internal` (500) with the diagnosis string attached.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                // Unique-constraint backstop for concurrent registrations
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("username") {
                        return ApiError::DuplicateUsername("username".to_string());
                    }
                }

                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert validation errors to API errors, listing every violated field
impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();

        ApiError::Validation(errors)
    }
}

/// Convert auth middleware errors to API errors
impl From<taskdock_shared::auth::middleware::AuthError> for ApiError {
    fn from(err: taskdock_shared::auth::middleware::AuthError) -> Self {
        use taskdock_shared::auth::middleware::AuthError;

        match err {
            AuthError::MissingToken => ApiError::MissingToken,
            AuthError::InvalidToken(msg) => ApiError::InvalidToken(msg),
            AuthError::ExpiredToken => ApiError::ExpiredToken,
        }
    }
}

/// Convert JWT errors to API errors
impl From<taskdock_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: taskdock_shared::auth::jwt::JwtError) -> Self {
        use taskdock_shared::auth::jwt::JwtError;

        match err {
            JwtError::Expired => ApiError::ExpiredToken,
            JwtError::InvalidIssuer { .. } => {
                ApiError::InvalidToken("Invalid token issuer".to_string())
            }
            _ => ApiError::InvalidToken(format!("Invalid token: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<taskdock_shared::auth::password::PasswordError> for ApiError {
    fn from(err: taskdock_shared::auth::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Convert ownership policy errors to API errors
impl From<taskdock_shared::auth::ownership::OwnershipError> for ApiError {
    fn from(err: taskdock_shared::auth::ownership::OwnershipError) -> Self {
        use taskdock_shared::auth::ownership::OwnershipError;

        match err {
            OwnershipError::NotOwner => {
                ApiError::Forbidden("You do not have access to this task".to_string())
            }
        }
    }
}
