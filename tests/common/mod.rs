use contact_service::config::{AppConfig, SnsConfig};
use contact_service::services::MockPublisher;
use contact_service::startup::Application;
use std::sync::Arc;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub publisher: Arc<MockPublisher>,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Arc::new(MockPublisher::new(true))).await
    }

    pub async fn spawn_with(publisher: Arc<MockPublisher>) -> Self {
        // Use random port for testing (port 0)
        let config = AppConfig {
            port: 0,
            sns: SnsConfig {
                topic_arn: "arn:aws:sns:us-east-1:000000000000:contact-topic-test".to_string(),
                region: None,
                enabled: false, // Use mock
            },
        };

        let app = Application::with_publisher(config, publisher.clone())
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            publisher,
        }
    }

    pub fn submit_url(&self) -> String {
        format!("{}/submit", self.address)
    }
}
