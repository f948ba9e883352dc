//! Metrics collection and exposition.
//!
//! # Metrics
//! - `chainshield_rpc_attempts_total` (counter): endpoint attempts by chain, outcome
//! - `chainshield_rpc_exhausted_total` (counter): calls where every endpoint failed
//! - `chainshield_balance_lookups_total` (counter): balance records by chain, status
//! - `chainshield_risk_assessments_total` (counter): assessments by level
//! - `chainshield_endpoint_health` (gauge): 1=healthy, 0=unhealthy
//!
//! # Design Decisions
//! - Recording goes through the `metrics` facade; without an installed
//!   recorder every call is a no-op, so library users and tests pay nothing
//! - The Prometheus exporter is only installed by the binary

use metrics::{counter, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;

use crate::blockchain::types::ChainId;
use crate::risk::types::RiskLevel;

/// Install the Prometheus recorder and its HTTP scrape listener.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_rpc_attempt(chain: &ChainId, outcome: &'static str) {
    counter!(
        "chainshield_rpc_attempts_total",
        "chain" => chain.to_string(),
        "outcome" => outcome
    )
    .increment(1);
}

pub fn record_rpc_exhausted(chain: &ChainId) {
    counter!("chainshield_rpc_exhausted_total", "chain" => chain.to_string()).increment(1);
}

pub fn record_balance_lookup(chain: &ChainId, available: bool) {
    let status = if available { "ok" } else { "unavailable" };
    counter!(
        "chainshield_balance_lookups_total",
        "chain" => chain.to_string(),
        "status" => status
    )
    .increment(1);
}

pub fn record_risk_assessment(level: RiskLevel) {
    counter!("chainshield_risk_assessments_total", "level" => level.as_str()).increment(1);
}

pub fn record_endpoint_health(endpoint: &str, healthy: bool) {
    gauge!("chainshield_endpoint_health", "endpoint" => endpoint.to_string())
        .set(if healthy { 1.0 } else { 0.0 });
}
