pub mod sns;

use crate::models::OutboundNotification;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use sns::{MockPublisher, SnsPublisher};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not enabled: {0}")]
    NotEnabled(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Send error: {0}")]
    SendFailed(String),
}

/// Acknowledgement returned by a provider after a successful publish.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishReceipt {
    pub provider_id: Option<String>,
}

impl PublishReceipt {
    pub fn new(provider_id: Option<String>) -> Self {
        Self { provider_id }
    }
}

#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(
        &self,
        notification: &OutboundNotification,
    ) -> Result<PublishReceipt, ProviderError>;

    fn is_enabled(&self) -> bool;
}
