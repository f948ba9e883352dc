//! Compiled risk rules.
//!
//! `RiskConfig` is what operators write; `RiskRules` is the normalized form
//! the engine evaluates (lookup sets, lowercased substrings).

use alloy::primitives::U256;
use std::collections::{BTreeMap, BTreeSet};

use crate::blockchain::types::ChainId;
use crate::config::schema::{Denomination, RiskConfig, RiskWeights};

/// The rules the engine knows, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RiskRule {
    Blacklist,
    SuspiciousMethod,
    HighValue,
    ContractCall,
}

impl RiskRule {
    pub const ALL: [RiskRule; 4] = [
        RiskRule::Blacklist,
        RiskRule::SuspiciousMethod,
        RiskRule::HighValue,
        RiskRule::ContractCall,
    ];

    /// Name used in configuration (`[risk.risk_weights]`).
    pub fn name(self) -> &'static str {
        match self {
            RiskRule::Blacklist => "blacklist",
            RiskRule::SuspiciousMethod => "suspicious_method",
            RiskRule::HighValue => "high_value",
            RiskRule::ContractCall => "contract_call",
        }
    }

    pub fn weight(self, weights: &RiskWeights) -> u32 {
        match self {
            RiskRule::Blacklist => weights.blacklist,
            RiskRule::SuspiciousMethod => weights.suspicious_method,
            RiskRule::HighValue => weights.high_value,
            RiskRule::ContractCall => weights.contract_call,
        }
    }
}

/// Read-only rule set shared by every assessment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskRules {
    pub blacklist: BTreeSet<String>,
    /// Lowercased method substrings.
    pub suspicious_methods: Vec<String>,
    pub high_value_threshold: U256,
    pub weights: RiskWeights,
    pub default_denomination: Denomination,
    pub denominations: BTreeMap<ChainId, Denomination>,
}

impl RiskRules {
    pub fn from_config(config: &RiskConfig) -> Self {
        let mut suspicious_methods: Vec<String> = Vec::new();
        for method in &config.suspicious_methods {
            let lowered = method.trim().to_lowercase();
            if !lowered.is_empty() && !suspicious_methods.contains(&lowered) {
                suspicious_methods.push(lowered);
            }
        }

        Self {
            blacklist: config.blacklist_addresses.iter().cloned().collect(),
            suspicious_methods,
            high_value_threshold: config.high_value_threshold,
            weights: config.risk_weights,
            default_denomination: config.default_denomination.clone(),
            denominations: config.denominations.clone(),
        }
    }

    /// Unit used to render amounts for `chain`.
    pub fn denomination_for(&self, chain: &ChainId) -> &Denomination {
        self.denominations
            .get(chain)
            .unwrap_or(&self.default_denomination)
    }
}

impl Default for RiskRules {
    fn default() -> Self {
        Self::from_config(&RiskConfig::default())
    }
}
