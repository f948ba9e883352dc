//! Multi-chain balance aggregation.
//!
//! # Responsibilities
//! - Fan one balance lookup per requested chain out concurrently
//! - Return exactly one record per requested chain, in request order
//! - Contain failures (including panics) to the chain that produced them
//!
//! Dropping the future returned by [`BalanceAggregator::get_multi_chain_balance`]
//! drops every in-flight lookup with it.

use futures_util::future::join_all;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::Instrument;
use uuid::Uuid;

use crate::balances::lookup::fetch_balance;
use crate::balances::types::BalanceRecord;
use crate::blockchain::client::FailoverClient;
use crate::blockchain::types::ChainId;
use crate::observability::metrics;

/// Concurrent balance lookups over a shared failover client.
#[derive(Debug, Clone)]
pub struct BalanceAggregator {
    client: FailoverClient,
}

impl BalanceAggregator {
    pub fn new(client: FailoverClient) -> Self {
        Self { client }
    }

    /// Balance of `address` on a single chain.
    pub async fn get_balance(&self, chain: &ChainId, address: &str) -> BalanceRecord {
        fetch_balance(&self.client, chain, address).await
    }

    /// Balance of `address` on every chain in `chains`.
    ///
    /// Latency is bounded by the slowest chain. Duplicate chains are looked
    /// up independently.
    pub async fn get_multi_chain_balance(&self, address: &str, chains: &[ChainId]) -> Vec<BalanceRecord> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("multi_chain_balance", %request_id, chains = chains.len());

        async move {
            let lookups = chains.iter().map(|chain| {
                AssertUnwindSafe(self.get_balance(chain, address))
                    .catch_unwind()
                    .map(move |outcome| match outcome {
                        Ok(record) => record,
                        Err(payload) => {
                            let message = panic_message(&*payload);
                            tracing::error!(chain = %chain, error = %message, "Balance lookup panicked");
                            metrics::record_balance_lookup(chain, false);
                            BalanceRecord::unavailable(chain.clone(), address, message)
                        }
                    })
            });

            let records = join_all(lookups).await;

            let available = records.iter().filter(|r| r.is_available()).count();
            tracing::info!(
                available,
                unavailable = records.len() - available,
                "Multi-chain balance lookup complete"
            );
            records
        }
        .instrument(span)
        .await
    }

    pub fn client(&self) -> &FailoverClient {
        &self.client
    }
}

/// Text of a panic payload (`&str` or `String`), or a generic marker.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("Balance lookup panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("Balance lookup panicked: {}", s)
    } else {
        "Balance lookup panicked".to_string()
    }
}
