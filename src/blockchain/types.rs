//! Chain-specific types and error definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

// Re-export RpcConfig from config module to avoid duplication
pub use crate::config::schema::RpcConfig;

/// Network name used as the registry key (e.g. `polkadot`).
///
/// Always lowercase ASCII alphanumerics plus `-` and `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainId(String);

/// Rejected chain name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid chain identifier '{0}'")]
pub struct ChainIdError(pub String);

impl ChainId {
    pub fn new(name: impl AsRef<str>) -> Result<Self, ChainIdError> {
        let raw = name.as_ref();
        let normalized = raw.trim().to_ascii_lowercase();
        let valid = !normalized.is_empty()
            && normalized
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ChainIdError(raw.to_string()));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ChainId {
    type Error = ChainIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ChainId> for String {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// One RPC endpoint serving a chain. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    chain: ChainId,
    url: Url,
}

impl Endpoint {
    pub fn new(chain: ChainId, url: Url) -> Self {
        Self { chain, url }
    }

    pub fn chain(&self) -> &ChainId {
        &self.chain
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

/// Why a single endpoint attempt failed.
///
/// Every variant is recoverable by moving on to the next endpoint.
#[derive(Debug, Error)]
pub enum RpcError {
    /// The attempt exceeded the per-endpoint deadline.
    #[error("RPC timeout after {0} ms")]
    Timeout(u64),

    /// Connection, TLS or body transfer failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Endpoint answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Endpoint answered with a JSON-RPC error object.
    #[error("RPC error: {0}")]
    Remote(String),

    /// Body was not a JSON-RPC response.
    #[error("invalid RPC response: {0}")]
    InvalidResponse(String),

    /// Response had neither an error nor a non-null result.
    #[error("RPC response carried no result")]
    EmptyResult,
}

impl RpcError {
    /// Short label used for metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            RpcError::Timeout(_) => "timeout",
            RpcError::Transport(_) => "transport",
            RpcError::Status(_) => "status",
            RpcError::Remote(_) => "remote_error",
            RpcError::InvalidResponse(_) => "invalid_response",
            RpcError::EmptyResult => "empty_result",
        }
    }
}

/// Result type for RPC operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// Basic chain metadata reported by `system_properties` / `system_chain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainInfo {
    pub chain: ChainId,
    /// Human readable chain name, when the node reported one.
    pub name: Option<String>,
    pub decimals: u8,
    pub symbol: String,
    pub properties: Value,
}
