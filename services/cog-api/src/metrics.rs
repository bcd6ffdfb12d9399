//! Prometheus metrics for conversions.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new().install_recorder()
}

pub fn record_request() {
    counter!("cog_requests_total").increment(1);
}

pub fn record_failure(kind: &'static str) {
    counter!("cog_failures_total", "kind" => kind).increment(1);
}

pub fn record_conversion(duration_ms: u64, slices: usize) {
    histogram!("cog_conversion_duration_ms").record(duration_ms as f64);
    counter!("cog_slices_total").increment(slices as u64);
}
