//! Metrics collection and exposition.
//!
//! # Metrics
//! - `auth_proxy_decisions_total` (counter): gate decisions by outcome
//! - `auth_proxy_upstream_requests_total` (counter): backend responses by status
//! - `auth_proxy_upstream_failures_total` (counter): forwarding failures by kind
//! - `auth_proxy_upstream_duration_seconds` (histogram): time to response headers
//!
//! Recording is a no-op until an exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::auth::Outcome;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_decision(outcome: Outcome) {
    counter!("auth_proxy_decisions_total", "outcome" => outcome.as_str()).increment(1);
}

pub fn record_upstream(status: u16, start: Instant) {
    counter!("auth_proxy_upstream_requests_total", "status" => status.to_string()).increment(1);
    histogram!("auth_proxy_upstream_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_upstream_failure(kind: &'static str) {
    counter!("auth_proxy_upstream_failures_total", "kind" => kind).increment(1);
}
