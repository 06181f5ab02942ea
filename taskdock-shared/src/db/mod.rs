/// Database layer for taskdock
///
/// This module provides connection pooling and the migration runner.
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with a startup health check
/// - `migrations`: embedded migration runner
///
/// # Example
///
/// ```no_run
/// use taskdock_shared::db::pool::create_pool;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let url = std::env::var("DATABASE_URL")?;
///     let pool = create_pool(&url, 10).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
