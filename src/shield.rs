//! Service facade.
//!
//! `Shield` is what an HTTP layer (or the CLI) holds: one scorer and one
//! balance aggregator built from the same configuration.

use std::sync::Arc;

use crate::balances::{BalanceAggregator, BalanceRecord};
use crate::blockchain::client::FailoverClient;
use crate::blockchain::types::{ChainId, ChainInfo, RpcResult};
use crate::config::ShieldConfig;
use crate::health::{probe_chain, EndpointHealth};
use crate::risk::{RiskAssessment, RiskRules, RiskScorer, Transaction};

#[derive(Debug, Clone)]
pub struct Shield {
    scorer: RiskScorer,
    balances: BalanceAggregator,
}

impl Shield {
    pub fn new(scorer: RiskScorer, balances: BalanceAggregator) -> Self {
        Self { scorer, balances }
    }

    /// Build every component from a validated configuration.
    pub fn from_config(config: &ShieldConfig) -> RpcResult<Self> {
        let client = FailoverClient::from_config(&config.rpc)?;
        let rules = Arc::new(RiskRules::from_config(&config.risk));

        Ok(Self::new(RiskScorer::new(rules), BalanceAggregator::new(client)))
    }

    pub fn calculate_risk(&self, tx: &Transaction) -> RiskAssessment {
        self.scorer.calculate_risk(tx)
    }

    pub async fn get_multi_chain_balance(&self, address: &str, chains: &[ChainId]) -> Vec<BalanceRecord> {
        self.balances.get_multi_chain_balance(address, chains).await
    }

    pub async fn get_chain_info(&self, chain: &ChainId) -> Option<ChainInfo> {
        self.client().get_chain_info(chain).await
    }

    pub async fn probe_chain(&self, chain: &ChainId) -> Vec<EndpointHealth> {
        probe_chain(self.client(), chain).await
    }

    pub fn client(&self) -> &FailoverClient {
        self.balances.client()
    }

    pub fn scorer(&self) -> &RiskScorer {
        &self.scorer
    }
}
