//! Application startup and lifecycle management.
//!
//! Binds the HTTP listener, wires the publish provider into shared state, and
//! runs the server until shutdown.

use crate::config::AppConfig;
use crate::error::AppError;
use crate::handlers::{health_check, submit};
use crate::services::{get_metrics, MockPublisher, NotificationPublisher, SnsPublisher};
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub publisher: Arc<dyn NotificationPublisher>,
}

async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

/// The submit route accepts POST only.
async fn method_not_allowed() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, "method not allowed")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration, selecting the real
    /// SNS publisher or the mock depending on `SNS_ENABLED`.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let publisher: Arc<dyn NotificationPublisher> = if config.sns.enabled {
            let publisher = SnsPublisher::new(&config.sns).await;
            tracing::info!(topic_arn = %config.sns.topic_arn, "SNS publisher initialized");
            Arc::new(publisher)
        } else {
            tracing::info!("SNS publisher disabled, using mock publisher");
            Arc::new(MockPublisher::new(true))
        };

        Self::with_publisher(config, publisher).await
    }

    /// Build the application with an explicit publisher. Tests use this to
    /// inject an inspectable mock.
    pub async fn with_publisher(
        config: AppConfig,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Result<Self, AppError> {
        // Port 0 binds a random port for testing.
        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        let state = AppState { config, publisher };

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    fn router(state: AppState) -> Router {
        Router::new()
            .route("/submit", post(submit).fallback(method_not_allowed))
            .route("/health", get(health_check))
            .route("/metrics", get(metrics_endpoint))
            .layer(tower_http::trace::TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = Self::router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}
