use contact_service::config::AppConfig;
use contact_service::observability::init_tracing;
use contact_service::services::init_metrics;
use contact_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_tracing("info");
    init_metrics();

    let config = AppConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("contact-service listening on port {}", app.port());

    app.run_until_stopped().await
}
