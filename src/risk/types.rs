//! Risk scoring types.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::blockchain::types::ChainId;

/// A transaction submitted for assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub from_address: String,
    pub to_address: String,
    /// Amount in the smallest on-chain unit.
    #[serde(with = "crate::amount::serde_decimal")]
    pub amount: U256,
    /// Called pallet method, e.g. `balances.transfer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Opaque call data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub chain: ChainId,
}

/// Discrete risk classification, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Scores at or above this are HIGH.
    pub const HIGH_THRESHOLD: u8 = 60;
    /// Scores at or above this (and below HIGH) are MEDIUM.
    pub const MEDIUM_THRESHOLD: u8 = 30;

    pub fn from_score(score: u8) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            RiskLevel::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of scoring one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 0 (safe) to 100 (high risk).
    pub score: u8,
    pub level: RiskLevel,
    /// Human readable explanations in rule order; never empty.
    pub reasons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
        assert!(RiskLevel::Low < RiskLevel::Medium && RiskLevel::Medium < RiskLevel::High);
    }

    #[test]
    fn test_transaction_from_api_payload() {
        let tx: Transaction = serde_json::from_value(json!({
            "from_address": "5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty",
            "to_address": "5GNJqTPyNqANBkUVMN1LPPrxXnFouWXoe2wNSmmEoLctxiZY",
            "amount": "100000000000",
            "chain": "polkadot",
            "method": "transfer"
        }))
        .unwrap();

        assert_eq!(tx.amount, U256::from(100_000_000_000u64));
        assert_eq!(tx.method.as_deref(), Some("transfer"));
        assert_eq!(tx.data, None);
        assert_eq!(tx.chain.as_str(), "polkadot");
    }

    #[test]
    fn test_transaction_rejects_non_numeric_amount() {
        let result: Result<Transaction, _> = serde_json::from_value(json!({
            "from_address": "a",
            "to_address": "b",
            "amount": "lots",
            "chain": "polkadot"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_assessment_serialization() {
        let assessment = RiskAssessment {
            score: 75,
            level: RiskLevel::High,
            reasons: vec!["Address on blacklist".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&assessment).unwrap(),
            json!({"score": 75, "level": "HIGH", "reasons": ["Address on blacklist"]})
        );
    }
}
