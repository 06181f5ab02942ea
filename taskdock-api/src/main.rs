//! # Taskdock API Server
//!
//! A minimal task-tracking HTTP service: clients register, authenticate, and
//! perform CRUD operations on tasks scoped to their account.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p taskdock-api
//! ```

use taskdock_api::{
    app::{build_router, AppState},
    config::Config,
};
use taskdock_shared::db::{migrations, pool};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "taskdock_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Taskdock API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;
    let database_url = config.database.connection_string();

    // Initialize database
    migrations::ensure_database_exists(&database_url).await?;
    let db = pool::create_pool(&database_url, config.database.max_connections).await?;
    migrations::run_migrations(&db).await?;

    // Build application
    let bind_address = config.bind_address();
    let state = AppState::new(db.clone(), config);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, exiting...");
    pool::close_pool(db).await;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
}
