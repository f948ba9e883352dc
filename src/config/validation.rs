//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, decimals representable)
//! - Check endpoint URLs are absolute http(s) URLs without duplicates
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ShieldConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use thiserror::Error;
use url::Url;

use crate::blockchain::types::ChainId;
use crate::config::schema::ShieldConfig;

/// Largest decimals value whose scale factor is rendered exactly.
pub const MAX_DECIMALS: u8 = 38;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rpc.timeout_ms must be greater than zero")]
    ZeroTimeout,

    #[error("chain '{chain}': invalid endpoint URL '{url}': {reason}")]
    InvalidEndpoint {
        chain: ChainId,
        url: String,
        reason: String,
    },

    #[error("chain '{chain}': endpoint '{url}' is listed more than once")]
    DuplicateEndpoint { chain: ChainId, url: String },

    #[error("risk.suspicious_methods must not contain empty entries")]
    EmptySuspiciousMethod,

    #[error("denomination for '{scope}' has {decimals} decimals (max {max})", max = MAX_DECIMALS)]
    DecimalsOutOfRange { scope: String, decimals: u8 },

    #[error("health.interval_secs must be greater than zero")]
    ZeroHealthInterval,
}

/// Validate a parsed configuration.
pub fn validate_config(config: &ShieldConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rpc.timeout_ms == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    for (chain, chain_config) in &config.rpc.chains {
        let mut seen = HashSet::new();
        for url in &chain_config.endpoints {
            match Url::parse(url) {
                Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                    if !seen.insert(parsed) {
                        errors.push(ValidationError::DuplicateEndpoint {
                            chain: chain.clone(),
                            url: url.clone(),
                        });
                    }
                }
                Ok(parsed) => errors.push(ValidationError::InvalidEndpoint {
                    chain: chain.clone(),
                    url: url.clone(),
                    reason: format!("unsupported scheme '{}'", parsed.scheme()),
                }),
                Err(e) => errors.push(ValidationError::InvalidEndpoint {
                    chain: chain.clone(),
                    url: url.clone(),
                    reason: e.to_string(),
                }),
            }
        }
    }

    if config.risk.suspicious_methods.iter().any(|m| m.trim().is_empty()) {
        errors.push(ValidationError::EmptySuspiciousMethod);
    }

    let denominations = std::iter::once(("default".to_string(), &config.risk.default_denomination))
        .chain(
            config
                .risk
                .denominations
                .iter()
                .map(|(chain, d)| (chain.to_string(), d)),
        );
    for (scope, denomination) in denominations {
        if denomination.decimals > MAX_DECIMALS {
            errors.push(ValidationError::DecimalsOutOfRange {
                scope,
                decimals: denomination.decimals,
            });
        }
    }

    if config.health.interval_secs == 0 {
        errors.push(ValidationError::ZeroHealthInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
