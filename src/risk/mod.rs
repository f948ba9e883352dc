//! Transaction risk scoring.
//!
//! # Data Flow
//! ```text
//! [risk] configuration
//!     → rules.rs (RiskRules: blacklist set, lowercased substrings, weights)
//! Transaction
//!     → engine.rs (evaluate every RiskRule in order, sum weights, clamp)
//!     → RiskAssessment { score, level, reasons }
//! ```
//!
//! # Rules
//! - blacklist: sender or recipient exactly matches a listed address
//! - suspicious_method: method contains a configured substring (any case)
//! - high_value: amount strictly above the threshold
//! - contract_call: call data longer than ten characters

pub mod engine;
pub mod rules;
pub mod types;

pub use engine::{assess, calculate_risk, RiskScorer};
pub use rules::{RiskRule, RiskRules};
pub use types::{RiskAssessment, RiskLevel, Transaction};
