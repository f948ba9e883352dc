//! End-to-end balance aggregation through the `Shield` facade.

mod common;

use alloy::primitives::U256;
use chainshield::config::{ChainConfig, ShieldConfig};
use chainshield::{ChainId, Shield};
use common::{account, dead_url, start_fixed_node, start_rpc_node, MockReply};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

fn chain(name: &str) -> ChainId {
    ChainId::new(name).unwrap()
}

fn shield(chains: Vec<(&str, Vec<String>)>, timeout_ms: u64) -> Shield {
    let mut config = ShieldConfig::default();
    config.rpc.timeout_ms = timeout_ms;
    config.rpc.chains = chains
        .into_iter()
        .map(|(name, endpoints)| (chain(name), ChainConfig { endpoints }))
        .collect::<BTreeMap<_, _>>();
    Shield::from_config(&config).unwrap()
}

#[tokio::test]
async fn test_partial_outage_is_isolated() {
    let polkadot = start_fixed_node(MockReply::Result(account("1000000000000", "500", "0x0"))).await;
    let westend = start_fixed_node(MockReply::Result(account("7", "0", "2"))).await;

    let shield = shield(
        vec![
            ("polkadot", vec![polkadot.url()]),
            ("kusama", vec![dead_url().await, dead_url().await]),
            ("westend", vec![westend.url()]),
        ],
        500,
    );

    let records = shield
        .get_multi_chain_balance("addr", &[chain("polkadot"), chain("kusama"), chain("westend")])
        .await;

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].chain, chain("polkadot"));
    assert_eq!(records[0].balance.free, U256::from(1_000_000_000_000u64));
    assert_eq!(records[0].balance.total, U256::from(1_000_000_000_500u64));

    assert_eq!(records[1].chain, chain("kusama"));
    assert_eq!(records[1].error.as_deref(), Some("Failed to fetch balance"));
    assert_eq!(records[1].balance.total, U256::ZERO);

    assert_eq!(records[2].balance.transferable, U256::from(5u64));
}

#[tokio::test]
async fn test_two_timeouts_then_third_endpoint_answers() {
    let first = start_fixed_node(MockReply::Hang).await;
    let second = start_fixed_node(MockReply::Hang).await;
    let third = start_fixed_node(MockReply::Result(json!({"data": {"free": 100, "reserved": 0, "frozen": 10}}))).await;
    let shield = shield(vec![("polkadot", vec![first.url(), second.url(), third.url()])], 200);

    let records = shield.get_multi_chain_balance("addr", &[chain("polkadot")]).await;
    assert!(records[0].is_available());
    assert_eq!(records[0].balance.total, U256::from(100u64));
    assert_eq!(records[0].balance.transferable, U256::from(90u64));
    assert_eq!(third.hits(), 1);
}

#[tokio::test]
async fn test_lookup_sends_address_to_node() {
    let node = start_rpc_node(|method| match method {
        "system_account" => MockReply::Result(account("42", "0", "0")),
        _ => MockReply::RpcError(-32601, "Method not found"),
    })
    .await;
    let shield = shield(vec![("polkadot", vec![node.url()])], 1000);

    let records = shield.get_multi_chain_balance("5Alice", &[chain("polkadot")]).await;
    assert!(records[0].is_available());
    assert_eq!(records[0].address, "5Alice");
    assert_eq!(records[0].balance.free, U256::from(42u64));
}

#[tokio::test]
async fn test_slow_chain_does_not_serialize_siblings() {
    let slow_a = start_rpc_node(|_| MockReply::Hang).await;
    let slow_b = start_rpc_node(|_| MockReply::Hang).await;
    let ok = start_fixed_node(MockReply::Result(account("1", "0", "0"))).await;

    let shield = shield(
        vec![
            ("a", vec![slow_a.url(), ok.url()]),
            ("b", vec![slow_b.url(), ok.url()]),
        ],
        300,
    );

    let started = Instant::now();
    let records = shield.get_multi_chain_balance("addr", &[chain("a"), chain("b")]).await;
    // Both chains time out once then succeed; run concurrently this is ~1x the timeout.
    assert!(started.elapsed() < Duration::from_millis(550));
    assert!(records.iter().all(|r| r.is_available()));
}

#[tokio::test]
async fn test_malformed_balance_is_a_failure_marker() {
    let node = start_fixed_node(MockReply::Result(json!({"data": {"free": "-12"}}))).await;
    let shield = shield(vec![("polkadot", vec![node.url()])], 1000);

    let records = shield.get_multi_chain_balance("addr", &[chain("polkadot")]).await;
    assert!(!records[0].is_available());
    assert_eq!(records[0].balance.free, U256::ZERO);
}

#[tokio::test]
async fn test_records_serialize_for_callers() {
    let node = start_fixed_node(MockReply::Result(account("0x10", "0", "0"))).await;
    let shield = shield(vec![("polkadot", vec![node.url()])], 1000);

    let records = shield.get_multi_chain_balance("addr", &[chain("polkadot")]).await;
    let value = serde_json::to_value(&records[0]).unwrap();
    assert_eq!(value["chain"], "polkadot");
    assert_eq!(value["free"], "16");
    assert!(value.get("error").is_none());
}
