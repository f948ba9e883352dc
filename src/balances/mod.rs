//! Balance retrieval.
//!
//! # Data Flow
//! ```text
//! (address, [chain, ...])
//!     → aggregator.rs (one branch per chain, join_all, catch_unwind)
//!     → lookup.rs (system_account via FailoverClient, parse data fields)
//!     → [BalanceRecord, ...] in request order
//! ```

pub mod aggregator;
pub mod lookup;
pub mod types;

pub use aggregator::BalanceAggregator;
pub use types::{AccountBalance, BalanceRecord};
