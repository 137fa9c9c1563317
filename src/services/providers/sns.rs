use super::{NotificationPublisher, ProviderError, PublishReceipt};
use crate::config::SnsConfig;
use crate::models::OutboundNotification;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::Region;
use aws_sdk_sns::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// Publisher backed by AWS SNS.
///
/// The underlying client is connection-pooled and safe to share across
/// concurrent requests.
pub struct SnsPublisher {
    client: Client,
    enabled: bool,
}

impl SnsPublisher {
    pub async fn new(config: &SnsConfig) -> Self {
        let region_provider =
            RegionProviderChain::first_try(config.region.clone().map(Region::new))
                .or_default_provider()
                .or_else(Region::new("us-east-1"));
        let shared_config = aws_config::from_env().region(region_provider).load().await;

        Self {
            client: Client::new(&shared_config),
            enabled: config.enabled,
        }
    }
}

#[async_trait]
impl NotificationPublisher for SnsPublisher {
    async fn publish(
        &self,
        notification: &OutboundNotification,
    ) -> Result<PublishReceipt, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotEnabled(
                "SNS publisher is not enabled".to_string(),
            ));
        }

        let output = self
            .client
            .publish()
            .topic_arn(&notification.topic_arn)
            .subject(&notification.subject)
            .message(&notification.body)
            .send()
            .await
            .map_err(|e| ProviderError::SendFailed(format!("SNS publish failed: {}", e)))?;

        let provider_id = output
            .message_id()
            .map(|id| id.to_string())
            .ok_or_else(|| {
                ProviderError::SendFailed("SNS publish returned no message id".to_string())
            })?;

        tracing::info!(
            topic_arn = %notification.topic_arn,
            message_id = %provider_id,
            "Notification published to SNS"
        );

        Ok(PublishReceipt::new(Some(provider_id)))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Mock publisher for testing and for running without SNS access.
///
/// Records every published notification and hands out sequential ids so tests
/// can correlate responses with publish calls.
pub struct MockPublisher {
    enabled: bool,
    send_count: AtomicU64,
    fail_with: Mutex<Option<String>>,
    published: Mutex<Vec<OutboundNotification>>,
}

impl MockPublisher {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            send_count: AtomicU64::new(0),
            fail_with: Mutex::new(None),
            published: Mutex::new(Vec::new()),
        }
    }

    /// Make every subsequent publish fail with the given reason.
    pub fn fail_with(&self, reason: &str) {
        if let Ok(mut guard) = self.fail_with.lock() {
            *guard = Some(reason.to_string());
        }
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    /// Notifications published so far, in call order.
    pub fn published(&self) -> Vec<OutboundNotification> {
        self.published
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl NotificationPublisher for MockPublisher {
    async fn publish(
        &self,
        notification: &OutboundNotification,
    ) -> Result<PublishReceipt, ProviderError> {
        if !self.enabled {
            return Err(ProviderError::NotEnabled(
                "Mock publisher is not enabled".to_string(),
            ));
        }

        if let Ok(guard) = self.fail_with.lock() {
            if let Some(reason) = guard.as_ref() {
                return Err(ProviderError::SendFailed(reason.clone()));
            }
        }

        if let Ok(mut guard) = self.published.lock() {
            guard.push(notification.clone());
        }
        let seq = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::info!(
            topic_arn = %notification.topic_arn,
            subject = %notification.subject,
            "[MOCK] Notification would be published"
        );

        Ok(PublishReceipt::new(Some(format!("mock-sns-{}", seq))))
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
