//! Balance record types.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::blockchain::types::ChainId;

/// Error text for a chain whose endpoints all failed.
pub const FETCH_FAILED: &str = "Failed to fetch balance";

/// Account balance components in the smallest on-chain unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AccountBalance {
    #[serde(with = "crate::amount::serde_decimal")]
    pub free: U256,
    #[serde(with = "crate::amount::serde_decimal")]
    pub reserved: U256,
    #[serde(with = "crate::amount::serde_decimal")]
    pub frozen: U256,
    #[serde(with = "crate::amount::serde_decimal")]
    pub total: U256,
    #[serde(with = "crate::amount::serde_decimal")]
    pub transferable: U256,
}

impl AccountBalance {
    /// Derive `total` and `transferable` from the raw components.
    pub fn from_parts(free: U256, reserved: U256, frozen: U256) -> Self {
        Self {
            free,
            reserved,
            frozen,
            total: free.saturating_add(reserved),
            transferable: free.saturating_sub(frozen),
        }
    }
}

/// Balance of one address on one chain, or a failure marker.
///
/// A failure marker has `error` set and every amount zero. Output only: the
/// flattened amounts do not round-trip through `arbitrary_precision` JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceRecord {
    pub chain: ChainId,
    pub address: String,
    #[serde(flatten)]
    pub balance: AccountBalance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Unix seconds.
    pub fetched_at: u64,
}

impl BalanceRecord {
    pub fn available(chain: ChainId, address: &str, balance: AccountBalance) -> Self {
        Self {
            chain,
            address: address.to_string(),
            balance,
            error: None,
            fetched_at: unix_now(),
        }
    }

    pub fn unavailable(chain: ChainId, address: &str, error: impl Into<String>) -> Self {
        Self {
            chain,
            address: address.to_string(),
            balance: AccountBalance::default(),
            error: Some(error.into()),
            fetched_at: unix_now(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.error.is_none()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
