//! Single-chain balance lookup through the failover client.

use alloy::primitives::U256;
use serde_json::{json, Value};

use crate::amount::{parse_amount_value, AmountError};
use crate::balances::types::{AccountBalance, BalanceRecord, FETCH_FAILED};
use crate::blockchain::client::FailoverClient;
use crate::blockchain::types::ChainId;
use crate::observability::metrics;

/// Fetch the balance of `address` on `chain`.
///
/// Never fails: unreachable chains and malformed replies become failure
/// markers.
pub async fn fetch_balance(client: &FailoverClient, chain: &ChainId, address: &str) -> BalanceRecord {
    let record = match client
        .call(chain, "system_account", &[json!(address)])
        .await
    {
        Some(account) => match parse_account(&account) {
            Ok(balance) => BalanceRecord::available(chain.clone(), address, balance),
            Err(e) => {
                tracing::warn!(chain = %chain, error = %e, "Malformed account data");
                BalanceRecord::unavailable(chain.clone(), address, format!("Malformed balance: {}", e))
            }
        },
        None => BalanceRecord::unavailable(chain.clone(), address, FETCH_FAILED),
    };

    metrics::record_balance_lookup(chain, record.is_available());
    record
}

/// Read the balance fields of a `system_account` result.
///
/// Fields live under `data` on Substrate nodes; some proxies flatten them.
pub fn parse_account(account: &Value) -> Result<AccountBalance, AmountError> {
    let data = match account.get("data") {
        Some(data) if data.is_object() => data,
        _ => account,
    };

    Ok(AccountBalance::from_parts(
        field(data, "free")?,
        field(data, "reserved")?,
        field(data, "frozen")?,
    ))
}

/// A missing or null field is zero.
fn field(data: &Value, name: &str) -> Result<U256, AmountError> {
    match data.get(name) {
        None | Some(Value::Null) => Ok(U256::ZERO),
        Some(value) => parse_amount_value(value),
    }
}
