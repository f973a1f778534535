use finance_tracker::{
    api::{self, ApiState},
    config::{database, settings},
    errors::Result,
};
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load config.toml (optional) and apply env overrides
    let app_config = settings::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Connect and ensure tables exist
    let db = database::create_connection(&app_config.database.url)
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Serve the API
    let cors = api::cors_layer(&app_config.cors)?;
    let app = api::router(ApiState::new(db, &app_config.api), cors);

    let address = app_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {}", address);

    axum::serve(listener, app).await?;
    Ok(())
}
