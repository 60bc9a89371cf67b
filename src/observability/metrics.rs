//! Metrics collection and exposition.
//!
//! Counters:
//! - `gatehouse_admission_denied_total`: requests rejected by the registry
//! - `gatehouse_sweep_evictions_total`: idle clients removed by the sweeper
//! - `gatehouse_store_timeouts_total` (label `operation`): store calls that
//!   hit their deadline

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on `addr`. Call once at process startup
/// when metrics are enabled; recording is a no-op until a recorder exists.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

pub fn record_admission_denied() {
    metrics::counter!("gatehouse_admission_denied_total").increment(1);
}

pub fn record_sweep_evictions(evicted: usize) {
    metrics::counter!("gatehouse_sweep_evictions_total").increment(evicted as u64);
}

pub fn record_store_timeout(operation: &'static str) {
    metrics::counter!("gatehouse_store_timeouts_total", "operation" => operation).increment(1);
}
