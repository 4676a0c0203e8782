use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use event_signup_api::{app, config, middleware};
use persistence::stores::{CsvFileStore, PostgresStore, RegistrationStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging and metrics
    middleware::logging::init_logging(&config.logging);
    middleware::metrics::init_metrics();

    info!("Starting Event Signup API v{}", env!("CARGO_PKG_VERSION"));

    // Select the storage backend
    let store: Arc<dyn RegistrationStore> = match config.storage.backend {
        config::StorageBackend::Csv => {
            let store = CsvFileStore::new(config.storage.csv_path());
            info!("Using CSV file storage at {}", store.path().display());
            Arc::new(store)
        }
        config::StorageBackend::Postgres => {
            let pool = persistence::db::create_pool(&config.database).await?;

            info!("Running database migrations...");
            sqlx::migrate!("../persistence/src/migrations")
                .run(&pool)
                .await?;
            info!("Migrations completed");

            Arc::new(PostgresStore::new(pool))
        }
    };

    // One scoped setup step instead of existence checks before every write
    store.ensure_ready().await?;

    // Build application
    let app = app::create_app(config.clone(), store);

    // Start server
    let addr = config.socket_addr();
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
