//! Failover JSON-RPC client.
//!
//! # Responsibilities
//! - Walk a chain's endpoints in registry order
//! - Bound every attempt with the configured timeout
//! - Return the first successful result; never contact later endpoints
//! - Report exhaustion as `None` rather than an error

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::registry::EndpointRegistry;
use crate::blockchain::transport::{HttpTransport, RpcTransport};
use crate::blockchain::types::{ChainId, ChainInfo, Endpoint, RpcConfig, RpcError, RpcResult};
use crate::observability::metrics;

/// Decimals assumed when a node does not report `tokenDecimals`.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 10;

/// Symbol assumed when a node does not report `tokenSymbol`.
pub const DEFAULT_TOKEN_SYMBOL: &str = "DOT";

/// RPC client that fails over across a chain's endpoints.
#[derive(Clone)]
pub struct FailoverClient {
    /// Endpoint lists per chain (primary first).
    registry: Arc<EndpointRegistry>,
    /// How calls reach an endpoint.
    transport: Arc<dyn RpcTransport>,
    /// Deadline for a single endpoint attempt.
    timeout_duration: Duration,
}

impl FailoverClient {
    pub fn new(
        registry: Arc<EndpointRegistry>,
        transport: Arc<dyn RpcTransport>,
        timeout_duration: Duration,
    ) -> Self {
        Self {
            registry,
            transport,
            timeout_duration,
        }
    }

    /// Build a client with the HTTP transport from `[rpc]` configuration.
    pub fn from_config(config: &RpcConfig) -> RpcResult<Self> {
        let registry = Arc::new(EndpointRegistry::from_config(config));
        let transport = Arc::new(HttpTransport::new(&config.user_agent)?);

        tracing::info!(
            chains = registry.chains().count(),
            timeout_ms = config.timeout_ms,
            "RPC client initialized"
        );

        Ok(Self::new(
            registry,
            transport,
            Duration::from_millis(config.timeout_ms),
        ))
    }

    /// Call `method` on `chain`, failing over until one endpoint answers.
    ///
    /// Returns `None` when every endpoint failed (or none are registered).
    pub async fn call(&self, chain: &ChainId, method: &str, params: &[Value]) -> Option<Value> {
        let endpoints = self.registry.endpoints_for(chain);

        for (i, endpoint) in endpoints.iter().enumerate() {
            tracing::debug!(chain = %chain, endpoint = %endpoint, method, "Trying RPC endpoint");

            match self.call_endpoint(endpoint, method, params).await {
                Ok(result) => {
                    metrics::record_rpc_attempt(chain, "success");
                    tracing::info!(chain = %chain, endpoint = %endpoint, method, "RPC call succeeded");
                    return Some(result);
                }
                Err(e) => {
                    metrics::record_rpc_attempt(chain, e.outcome());
                    tracing::warn!(
                        chain = %chain,
                        endpoint_idx = i,
                        endpoint = %endpoint,
                        method,
                        error = %e,
                        "RPC call failed, trying next endpoint"
                    );
                }
            }
        }

        metrics::record_rpc_exhausted(chain);
        tracing::error!(chain = %chain, attempts = endpoints.len(), method, "All RPC endpoints failed");
        None
    }

    /// One attempt against one endpoint, bounded by the client timeout.
    pub async fn call_endpoint(
        &self,
        endpoint: &Endpoint,
        method: &str,
        params: &[Value],
    ) -> RpcResult<Value> {
        match timeout(self.timeout_duration, self.transport.call(endpoint, method, params)).await {
            Ok(result) => result,
            Err(_) => Err(RpcError::Timeout(self.timeout_duration.as_millis() as u64)),
        }
    }

    /// Fetch `system_properties` and `system_chain` for a chain.
    ///
    /// Returns `None` if the properties could not be fetched; the name is
    /// optional.
    pub async fn get_chain_info(&self, chain: &ChainId) -> Option<ChainInfo> {
        let (properties, name) = tokio::join!(
            self.call(chain, "system_properties", &[]),
            self.call(chain, "system_chain", &[]),
        );

        let properties = properties?;
        let decimals = first_of(&properties, "tokenDecimals")
            .and_then(Value::as_u64)
            .and_then(|d| u8::try_from(d).ok())
            .unwrap_or(DEFAULT_TOKEN_DECIMALS);
        let symbol = first_of(&properties, "tokenSymbol")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_TOKEN_SYMBOL)
            .to_string();

        Some(ChainInfo {
            chain: chain.clone(),
            name: name.and_then(|n| n.as_str().map(str::to_string)),
            decimals,
            symbol,
            properties,
        })
    }

    /// Get the endpoint registry.
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    /// Get the per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout_duration
    }
}

/// Substrate nodes report token properties either as scalars or as arrays
/// (multi-token chains); take the first entry in the latter case.
fn first_of<'a>(properties: &'a Value, key: &str) -> Option<&'a Value> {
    match properties.get(key)? {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

impl std::fmt::Debug for FailoverClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FailoverClient")
            .field("chains", &self.registry.chains().collect::<Vec<_>>())
            .field("timeout_ms", &self.timeout_duration.as_millis())
            .finish()
    }
}
