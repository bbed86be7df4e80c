use sea_orm::Database;
use sea_orm_migration::MigratorTrait;
use taskboard::{AppConfig, Migrator};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    let config = AppConfig::from_env()?;

    let db = Database::connect(config.connect_options()).await?;
    tracing::info!("Database connection pool created");

    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations applied");

    let app = taskboard::app(&db).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    tracing::info!(address = %config.bind_address, "Listening");
    tracing::info!("API reference at http://{}/docs", config.bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}
