//! Metrics collection and exposition.
//!
//! # Metrics
//! - `rpc_calls_total` (counter): intercepted calls by route, outcome
//! - `rpc_call_duration_seconds` (histogram): time until the outcome was decided
//! - `rpc_faults_total` (counter): handler panics relayed to the caller

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter with an HTTP scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a decided call.
pub fn record_call(route: &str, outcome: &'static str, started: Instant) {
    ::metrics::counter!("rpc_calls_total", "route" => route.to_string(), "outcome" => outcome)
        .increment(1);
    ::metrics::histogram!("rpc_call_duration_seconds", "route" => route.to_string())
        .record(started.elapsed().as_secs_f64());
}

/// Record a handler panic that is about to be re-raised.
pub fn record_fault(route: &str, started: Instant) {
    record_call(route, "faulted", started);
    ::metrics::counter!("rpc_faults_total", "route" => route.to_string()).increment(1);
}
