//! Per-endpoint liveness probes.

use futures_util::future::join_all;
use serde::Serialize;
use std::time::Instant;

use crate::blockchain::client::FailoverClient;
use crate::blockchain::types::{ChainId, Endpoint};

/// Method used to probe an endpoint; cheap on every Substrate node.
pub const PROBE_METHOD: &str = "system_chain";

/// Result of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointHealth {
    pub chain: ChainId,
    pub url: String,
    pub healthy: bool,
    pub latency_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Probe every endpoint of `chain` individually, without failover.
///
/// Probes run concurrently; results follow registry order.
pub async fn probe_chain(client: &FailoverClient, chain: &ChainId) -> Vec<EndpointHealth> {
    let endpoints = client.registry().endpoints_for(chain);
    join_all(endpoints.iter().map(|endpoint| probe_endpoint(client, endpoint))).await
}

async fn probe_endpoint(client: &FailoverClient, endpoint: &Endpoint) -> EndpointHealth {
    let started = Instant::now();
    let outcome = client.call_endpoint(endpoint, PROBE_METHOD, &[]).await;
    let latency_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(_) => EndpointHealth {
            chain: endpoint.chain().clone(),
            url: endpoint.url().to_string(),
            healthy: true,
            latency_ms,
            error: None,
        },
        Err(e) => {
            tracing::debug!(endpoint = %endpoint, error = %e, "Probe failed");
            EndpointHealth {
                chain: endpoint.chain().clone(),
                url: endpoint.url().to_string(),
                healthy: false,
                latency_ms,
                error: Some(e.to_string()),
            }
        }
    }
}
