//! Prometheus metrics for notification-service.

use metrics::{describe_counter, describe_gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder and describe the metrics this service
/// emits. Later calls are no-ops, so test harnesses can call it freely.
pub fn init_metrics() {
    if METRICS_HANDLE.get().is_some() {
        return;
    }

    match PrometheusBuilder::new().install_recorder() {
        Ok(handle) => {
            let _ = METRICS_HANDLE.set(handle);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Prometheus recorder already installed");
            return;
        }
    }

    describe_counter!(
        "notifications_sent_total",
        "Total notification requests accepted"
    );
    describe_counter!(
        "grpc_requests_total",
        "Total inbound RPCs across all methods"
    );
    describe_counter!(
        "load_alerts_total",
        "Sampling windows classified as critical load"
    );
    describe_gauge!(
        "request_rate",
        "Requests per second observed in the last sampling window"
    );
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}
