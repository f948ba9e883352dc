//! Periodic endpoint health monitoring.
//!
//! # Responsibilities
//! - Probe every endpoint of every configured chain on a fixed interval
//! - Publish the per-endpoint health gauge
//! - Log healthy/unhealthy transitions (not every probe)

use futures_util::future::join_all;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::time;

use crate::blockchain::client::FailoverClient;
use crate::config::HealthConfig;
use crate::health::probe::{probe_chain, EndpointHealth};
use crate::observability::metrics;

pub struct HealthMonitor {
    client: FailoverClient,
    config: HealthConfig,
    /// Last known state per endpoint URL.
    last_state: HashMap<String, bool>,
}

impl HealthMonitor {
    pub fn new(client: FailoverClient, config: HealthConfig) -> Self {
        Self {
            client,
            config,
            last_state: HashMap::new(),
        }
    }

    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Endpoint health monitor disabled");
            return;
        }

        tracing::info!(
            interval = self.config.interval_secs,
            chains = self.client.registry().chains().count(),
            "Health monitor starting"
        );

        let mut ticker = time::interval(Duration::from_secs(self.config.interval_secs.max(1)));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check_all().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Probe every chain once, concurrently, and return the raw results.
    ///
    /// A sweep takes as long as the slowest endpoint, not the sum.
    pub async fn check_all(&mut self) -> Vec<EndpointHealth> {
        let chains: Vec<_> = self.client.registry().chains().cloned().collect();
        let client = &self.client;
        let sweeps = join_all(chains.iter().map(|chain| probe_chain(client, chain))).await;

        let mut results = Vec::new();
        for (chain, probes) in chains.iter().zip(sweeps) {
            if !probes.is_empty() && probes.iter().all(|p| !p.healthy) {
                tracing::error!(chain = %chain, endpoints = probes.len(), "No healthy endpoints");
            }
            results.extend(probes);
        }

        for probe in &results {
            self.observe(probe);
        }
        results
    }

    fn observe(&mut self, probe: &EndpointHealth) {
        metrics::record_endpoint_health(&probe.url, probe.healthy);

        let previous = self.last_state.insert(probe.url.clone(), probe.healthy);
        match (previous, probe.healthy) {
            (Some(false), true) => {
                tracing::info!(chain = %probe.chain, endpoint = %probe.url, latency_ms = probe.latency_ms, "Endpoint recovered");
            }
            (Some(true) | None, false) => {
                tracing::warn!(
                    chain = %probe.chain,
                    endpoint = %probe.url,
                    error = probe.error.as_deref().unwrap_or("unknown"),
                    "Endpoint unhealthy"
                );
            }
            _ => {}
        }
    }

    /// Last observed state of an endpoint, if it has been probed.
    pub fn is_healthy(&self, url: &str) -> Option<bool> {
        self.last_state.get(url).copied()
    }
}
