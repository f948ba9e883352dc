//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for chainshield.
//! All types derive Serde traits for deserialization from config files, and
//! every section defaults so an absent file (or section) yields a working
//! setup for the public Polkadot networks.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::blockchain::types::ChainId;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ShieldConfig {
    /// RPC endpoints and client settings.
    pub rpc: RpcConfig,

    /// Risk scoring rules.
    pub risk: RiskConfig,

    /// Endpoint health monitoring.
    pub health: HealthConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// RPC client configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RpcConfig {
    /// Per-endpoint attempt timeout in milliseconds.
    pub timeout_ms: u64,

    /// User-Agent sent with every RPC request.
    pub user_agent: String,

    /// Ordered endpoint lists, keyed by chain name.
    pub chains: BTreeMap<ChainId, ChainConfig>,
}

/// Endpoints for one chain, primary first.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ChainConfig {
    #[serde(default)]
    pub endpoints: Vec<String>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        let mut chains = BTreeMap::new();
        for (name, endpoints) in DEFAULT_ENDPOINTS {
            if let Ok(chain) = ChainId::new(name) {
                chains.insert(
                    chain,
                    ChainConfig {
                        endpoints: endpoints.iter().map(|e| e.to_string()).collect(),
                    },
                );
            }
        }

        Self {
            timeout_ms: 10_000,
            user_agent: concat!("chainshield/", env!("CARGO_PKG_VERSION")).to_string(),
            chains,
        }
    }
}

/// Public endpoints used when no configuration file is present.
const DEFAULT_ENDPOINTS: &[(&str, &[&str])] = &[
    (
        "polkadot",
        &[
            "https://rpc.polkadot.io",
            "https://polkadot-rpc.dwellir.com",
            "https://polkadot.api.onfinality.io/public",
        ],
    ),
    (
        "kusama",
        &[
            "https://kusama-rpc.polkadot.io",
            "https://kusama-rpc.dwellir.com",
            "https://kusama.api.onfinality.io/public",
        ],
    ),
    (
        "westend",
        &["https://westend-rpc.polkadot.io", "https://westend-rpc.dwellir.com"],
    ),
];

/// Risk scoring configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskConfig {
    /// Addresses that flag a transaction on exact match (sender or recipient).
    pub blacklist_addresses: Vec<String>,

    /// Method substrings matched case-insensitively.
    pub suspicious_methods: Vec<String>,

    /// Amounts strictly above this (in planck) are high value.
    #[serde(with = "crate::amount::serde_decimal")]
    pub high_value_threshold: U256,

    /// Score contribution of each rule.
    pub risk_weights: RiskWeights,

    /// Unit used to render amounts for chains without an explicit entry.
    pub default_denomination: Denomination,

    /// Per-chain units for rendering amounts in reasons.
    pub denominations: BTreeMap<ChainId, Denomination>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        let mut denominations = BTreeMap::new();
        for (name, decimals, symbol) in [("polkadot", 10, "DOT"), ("kusama", 12, "KSM"), ("westend", 12, "WND")] {
            if let Ok(chain) = ChainId::new(name) {
                denominations.insert(chain, Denomination::new(decimals, symbol));
            }
        }

        Self {
            // Example entry (Alice's well-known dev account)
            blacklist_addresses: vec!["5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY".to_string()],
            suspicious_methods: ["proxy", "forceTransfer", "transferAll", "killAccount"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            high_value_threshold: U256::from(1_000_000_000_000u64), // 100 DOT
            risk_weights: RiskWeights::default(),
            default_denomination: Denomination::default(),
            denominations,
        }
    }
}

/// Weight added to the score when a rule triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RiskWeights {
    pub blacklist: u32,
    pub suspicious_method: u32,
    pub high_value: u32,
    pub contract_call: u32,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            blacklist: 50,
            suspicious_method: 30,
            high_value: 25,
            contract_call: 15,
        }
    }
}

/// Native token unit of a chain.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Denomination {
    /// Number of decimal places between planck and one token.
    pub decimals: u8,
    pub symbol: String,
}

impl Denomination {
    pub fn new(decimals: u8, symbol: &str) -> Self {
        Self {
            decimals,
            symbol: symbol.to_string(),
        }
    }
}

impl Default for Denomination {
    fn default() -> Self {
        Self::new(10, "DOT")
    }
}

/// Endpoint health monitoring configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Enable the periodic monitor.
    pub enabled: bool,

    /// Probe interval in seconds.
    pub interval_secs: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 30,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter used when `RUST_LOG` is unset (e.g. "info", "chainshield=debug").
    pub log_level: String,

    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
