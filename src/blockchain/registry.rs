//! Per-chain ordered endpoint lists.
//!
//! Order is failover priority: the first endpoint registered for a chain is
//! the primary. Nothing here reorders, shuffles or balances load.

use std::collections::BTreeMap;
use url::Url;

use crate::blockchain::types::{ChainId, Endpoint, RpcConfig};

/// Static registry of RPC endpoints, built once at startup.
#[derive(Debug, Clone, Default)]
pub struct EndpointRegistry {
    chains: BTreeMap<ChainId, Vec<Endpoint>>,
}

impl EndpointRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from the `[rpc.chains]` configuration.
    ///
    /// Invalid URLs are skipped with a warning; validation rejects them
    /// earlier for configs loaded from disk.
    pub fn from_config(config: &RpcConfig) -> Self {
        let mut registry = Self::new();

        for (chain, chain_config) in &config.chains {
            // Chains listed without endpoints still resolve (to nothing).
            registry.chains.entry(chain.clone()).or_default();

            for url_str in &chain_config.endpoints {
                if let Err(e) = registry.register(chain.clone(), url_str) {
                    tracing::warn!(chain = %chain, url = %url_str, error = %e, "Ignoring invalid RPC endpoint URL");
                }
            }
        }

        for (chain, endpoints) in &registry.chains {
            if endpoints.is_empty() {
                tracing::warn!(chain = %chain, "Chain has no RPC endpoints; lookups will always fail");
            }
        }

        registry
    }

    /// Append an endpoint to the end of a chain's failover list.
    pub fn register(&mut self, chain: ChainId, url: &str) -> Result<(), url::ParseError> {
        let url = Url::parse(url)?;
        self.chains
            .entry(chain.clone())
            .or_default()
            .push(Endpoint::new(chain, url));
        Ok(())
    }

    /// Endpoints for `chain` in failover order; empty for unknown chains.
    pub fn endpoints_for(&self, chain: &ChainId) -> &[Endpoint] {
        self.chains.get(chain).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All chains known to the registry, sorted by name.
    pub fn chains(&self) -> impl Iterator<Item = &ChainId> {
        self.chains.keys()
    }

    pub fn contains(&self, chain: &ChainId) -> bool {
        self.chains.contains_key(chain)
    }
}
