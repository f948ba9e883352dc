//! Endpoint health subsystem.
//!
//! # Data Flow
//! ```text
//! On demand (probe.rs):
//!     chain → system_chain against every endpoint, no failover
//!     → [EndpointHealth, ...] in registry order
//!
//! Periodic (active.rs):
//!     interval tick → probe every configured chain
//!     → health gauge + transition logs
//! ```
//!
//! # Design Decisions
//! - Probing is advisory: the failover client never skips an endpoint
//!   because a probe failed, so balance lookups stay independent of monitor
//!   timing

pub mod active;
pub mod probe;

pub use active::HealthMonitor;
pub use probe::{probe_chain, EndpointHealth};
