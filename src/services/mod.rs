pub mod metrics;
pub mod providers;

pub use metrics::{get_metrics, init_metrics, record_provider_call, record_submission};
pub use providers::{
    MockPublisher, NotificationPublisher, ProviderError, PublishReceipt, SnsPublisher,
};
