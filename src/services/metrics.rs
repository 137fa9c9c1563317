//! Metrics collection for contact-service.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus recorder. Called once at startup.
pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let handle = builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    if METRICS_HANDLE.set(handle).is_err() {
        panic!("failed to set metrics handle: already initialized");
    }
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

/// Record a handled submission by outcome.
pub fn record_submission(status: &str) {
    metrics::counter!("contact_submissions_total", "status" => status.to_string()).increment(1);
}

/// Record a publish call against the provider.
pub fn record_provider_call(provider: &str, status: &str) {
    metrics::counter!(
        "contact_provider_calls_total",
        "provider" => provider.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}
