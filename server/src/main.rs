//! Todo API HTTP server.
//!
//! CRUD over a single `Todos` table in SQLite.

use todo_api_server::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todo_api=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Todo API");

    let config = Config::from_env()?;
    info!(
        connection_string = %config.database.connection,
        environment = %config.environment,
        "Configuration loaded"
    );

    todo_api_server::run(config).await
}
