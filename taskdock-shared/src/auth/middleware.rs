/// Authentication middleware support for Axum
///
/// This module provides the pieces the API server's auth layer is built from:
/// bearer-token extraction from the Authorization header, the error taxonomy
/// for failed authentication, and the `AuthContext` added to request
/// extensions after a token validates.
///
/// # Request Extensions
///
/// After successful authentication the middleware adds:
/// - `AuthContext`: the verified identity (username) for the request
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskdock_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.username)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};

/// Authentication context added to request extensions
///
/// The username is the identity claim extracted from the verified token; all
/// downstream authorization compares against it as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated username
    pub username: String,
}

impl AuthContext {
    /// Creates auth context from a validated JWT identity claim
    pub fn from_claims(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Error type for authentication failures
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header on the request
    #[error("Missing authorization token")]
    MissingToken,

    /// Header present but not a well-formed Bearer credential
    #[error("Invalid authorization token: {0}")]
    InvalidToken(String),

    /// Token validated structurally but is past its expiry
    #[error("Authorization token has expired")]
    ExpiredToken,
}

/// Extracts the bearer token from a request's headers
///
/// # Errors
///
/// - `AuthError::MissingToken` if there is no Authorization header
/// - `AuthError::InvalidToken` if the header is not `Bearer <token>`
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use taskdock_shared::auth::middleware::extract_bearer;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
///
/// assert_eq!(extract_bearer(&headers).unwrap(), "abc");
/// ```
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}
