//! Metrics collection and exposition.
//!
//! # Metrics
//! - `surety_calls_total` (counter): contract calls by method and outcome
//! - `surety_call_duration_seconds` (histogram): latency per method
//! - `surety_node_health` (gauge): 1=reachable, 0=unreachable
//!
//! Recording is a no-op until a recorder is installed.

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record the outcome and latency of one contract call.
pub fn record_call(method: &'static str, ok: bool, elapsed: Duration) {
    let outcome = if ok { "ok" } else { "error" };
    counter!("surety_calls_total", "method" => method, "outcome" => outcome).increment(1);
    histogram!("surety_call_duration_seconds", "method" => method).record(elapsed.as_secs_f64());
}

/// Record whether the RPC node answered.
pub fn record_node_health(healthy: bool) {
    gauge!("surety_node_health").set(if healthy { 1.0 } else { 0.0 });
}
