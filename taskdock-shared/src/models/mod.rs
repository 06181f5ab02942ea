/// Database models for taskdock
///
/// This module contains the two persistent record types and their single-row
/// operations. All consistency (existence checks, mutation) is delegated to
/// single-statement atomic operations; there are no multi-row transactions.
///
/// # Models
///
/// - `user`: account records (username + password hash)
/// - `task`: task records owned by an account
///
/// # Example
///
/// ```no_run
/// use taskdock_shared::models::user::{CreateUser, User};
/// use taskdock_shared::db::pool::create_pool;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool("postgresql://localhost/taskdock", 10).await?;
///
/// let user = User::create(
///     &pool,
///     CreateUser {
///         username: "alice".to_string(),
///         password_hash: "$argon2id$...".to_string(),
///     },
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;
