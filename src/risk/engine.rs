//! Deterministic rule evaluation.
//!
//! Scoring is a pure function of the transaction and the rule set: no I/O,
//! no clocks, no shared state. Logging and metrics live in [`RiskScorer`],
//! which wraps the pure function.

use std::sync::Arc;

use crate::amount::format_units;
use crate::observability::metrics;
use crate::risk::rules::{RiskRule, RiskRules};
use crate::risk::types::{RiskAssessment, RiskLevel, Transaction};

/// Upper bound of the score.
pub const MAX_SCORE: u8 = 100;

/// Call data longer than this many characters counts as a contract call.
pub const CONTRACT_DATA_MIN_LEN: usize = 10;

/// Reason given when nothing triggered.
pub const NORMAL_REASON: &str = "Transaction appears normal";

/// Score a transaction against a rule set.
pub fn calculate_risk(tx: &Transaction, rules: &RiskRules) -> RiskAssessment {
    assess(tx, rules).0
}

/// Score a transaction and report which rules triggered, in rule order.
pub fn assess(tx: &Transaction, rules: &RiskRules) -> (RiskAssessment, Vec<RiskRule>) {
    let mut total: u32 = 0;
    let mut triggered = Vec::new();
    let mut reasons = Vec::new();

    for rule in RiskRule::ALL {
        if let Some(reason) = evaluate(rule, tx, rules) {
            total = total.saturating_add(rule.weight(&rules.weights));
            triggered.push(rule);
            reasons.push(reason);
        }
    }

    let score = total.min(u32::from(MAX_SCORE)) as u8;
    let level = RiskLevel::from_score(score);
    if reasons.is_empty() {
        reasons.push(NORMAL_REASON.to_string());
    }

    let assessment = RiskAssessment {
        score,
        level,
        reasons,
    };
    (assessment, triggered)
}

/// Reason text if `rule` triggers for `tx`.
fn evaluate(rule: RiskRule, tx: &Transaction, rules: &RiskRules) -> Option<String> {
    match rule {
        RiskRule::Blacklist => {
            let hit = rules.blacklist.contains(&tx.from_address)
                || rules.blacklist.contains(&tx.to_address);
            hit.then(|| "Address on blacklist".to_string())
        }
        RiskRule::SuspiciousMethod => {
            let method = tx.method.as_deref()?;
            let lowered = method.to_lowercase();
            rules
                .suspicious_methods
                .iter()
                .any(|s| lowered.contains(s.as_str()))
                .then(|| format!("Suspicious method: {}", method))
        }
        RiskRule::HighValue => (tx.amount > rules.high_value_threshold).then(|| {
            let unit = rules.denomination_for(&tx.chain);
            format!(
                "High value transfer: {} {}",
                format_units(tx.amount, unit.decimals),
                unit.symbol
            )
        }),
        RiskRule::ContractCall => {
            let data = tx.data.as_deref()?;
            (data.chars().count() > CONTRACT_DATA_MIN_LEN)
                .then(|| "Contract interaction detected".to_string())
        }
    }
}

/// Risk scorer bound to a rule set loaded at startup.
#[derive(Debug, Clone)]
pub struct RiskScorer {
    rules: Arc<RiskRules>,
}

impl RiskScorer {
    pub fn new(rules: Arc<RiskRules>) -> Self {
        Self { rules }
    }

    /// Assess a transaction, logging notable findings.
    pub fn calculate_risk(&self, tx: &Transaction) -> RiskAssessment {
        let (assessment, triggered) = assess(tx, &self.rules);

        for rule in &triggered {
            match rule {
                RiskRule::Blacklist => {
                    tracing::warn!(from = %tx.from_address, to = %tx.to_address, "Blacklisted address detected");
                }
                RiskRule::SuspiciousMethod => {
                    tracing::warn!(method = tx.method.as_deref().unwrap_or_default(), "Suspicious method detected");
                }
                RiskRule::HighValue | RiskRule::ContractCall => {}
            }
        }

        metrics::record_risk_assessment(assessment.level);
        tracing::info!(
            score = assessment.score,
            level = %assessment.level,
            chain = %tx.chain,
            tx = %abbreviate(&tx.from_address),
            "Risk assessment"
        );

        assessment
    }

    pub fn rules(&self) -> &RiskRules {
        &self.rules
    }
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(Arc::new(RiskRules::default()))
    }
}

/// First ten characters of an address, for log lines.
fn abbreviate(address: &str) -> String {
    let prefix: String = address.chars().take(10).collect();
    format!("{}...", prefix)
}
