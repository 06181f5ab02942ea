/// Authentication and authorization utilities
///
/// This module provides the secure primitives behind taskdock's account and
/// task-access model:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: Bearer-token extraction and the per-request auth context
/// - [`ownership`]: The task ownership policy (who may touch which task)
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with a per-password random salt
/// - **JWT Tokens**: HS256 signing, expiry fixed at issuance (1 hour)
/// - **Constant-time Comparison**: Password verification uses the
///   constant-time semantics of the Argon2 verify primitive
///
/// # Example
///
/// ```no_run
/// use taskdock_shared::auth::password::{hash_password, verify_password};
/// use taskdock_shared::auth::jwt::{create_token, Claims};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Password authentication
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
///
/// // Token issuance for a verified identity
/// let claims = Claims::new("alice");
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod ownership;
pub mod password;
