//! chainshield: transaction risk scoring and multi-chain balance retrieval
//! over a federated set of public Substrate RPC nodes.

pub mod amount;
pub mod balances;
pub mod blockchain;
pub mod config;
pub mod health;
pub mod lifecycle;
pub mod observability;
pub mod risk;
pub mod shield;

pub use blockchain::{ChainId, FailoverClient};
pub use config::schema::ShieldConfig;
pub use lifecycle::Shutdown;
pub use shield::Shield;
