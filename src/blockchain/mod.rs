//! Blockchain RPC subsystem.
//!
//! # Data Flow
//! ```text
//! [rpc.chains] configuration
//!     → registry.rs (ordered endpoints per chain)
//!     → client.rs (failover walk, per-attempt timeout)
//!     → transport.rs (JSON-RPC over HTTP)
//!     → first non-null result, or None when every endpoint failed
//! ```
//!
//! # Failure Handling
//! - Timeouts, HTTP errors and JSON-RPC errors are all "try the next endpoint"
//! - No endpoint is attempted twice within one call
//! - No backoff: failover is the only resilience mechanism

pub mod client;
pub mod registry;
pub mod transport;
pub mod types;

pub use client::FailoverClient;
pub use registry::EndpointRegistry;
pub use transport::{HttpTransport, RpcTransport};
pub use types::{ChainId, ChainInfo, Endpoint, RpcError, RpcResult};
