//! Integration tests for the staking and delegation clients.
//!
//! Tests marked `#[ignore]` talk to public mainnet endpoints and are run
//! manually. Everything else points at an unreachable local endpoint to
//! exercise the degraded paths without network access.

use alloy::primitives::{Address, U256};
use safestaking_core::staking::DEFAULT_FEE_BPS;
use safestaking_core::{
    AvalancheClient, Chain, ChainConfig, StakingClient, StakingError, WalletSession,
};

/// Anvil's well-known test key; never used on a real network.
const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Nothing listens on port 9; every RPC call fails fast.
fn unreachable_config(chain: Chain) -> ChainConfig {
    ChainConfig {
        chain,
        custom_url: Some("http://127.0.0.1:9".to_string()),
    }
}

fn offline_staking() -> StakingClient {
    let config = unreachable_config(Chain::Ethereum);
    let session = WalletSession::observe(&config, Some(Address::ZERO)).expect("session");
    StakingClient::new(session)
}

fn offline_avalanche_signing() -> AvalancheClient {
    let config = unreachable_config(Chain::Avalanche);
    let session = WalletSession::connect(&config, TEST_KEY).expect("session");
    AvalancheClient::new(session)
}

#[tokio::test]
async fn contract_stats_fall_back_when_rpc_is_unreachable() {
    let staking = offline_staking();
    let stats = staking.fetch_contract_stats().await;
    assert_eq!(stats.fee_bps, DEFAULT_FEE_BPS);
    assert_eq!(stats.total_staked_wei, U256::ZERO);
    assert_eq!(stats.total_users, 0);
    assert_eq!(staking.fee_bps(), DEFAULT_FEE_BPS);
}

#[tokio::test]
async fn balance_reads_degrade_to_zero() {
    let staking = offline_staking();
    let balance = staking.fetch_balance().await;
    assert_eq!(balance.eth_wei, U256::ZERO);
    assert_eq!(balance.steth_wei, U256::ZERO);

    let stats = staking.fetch_user_stats().await;
    assert_eq!(stats.staked_wei, U256::ZERO);
}

#[tokio::test]
async fn snapshot_always_lands_offline() {
    let staking = offline_staking();
    let snapshot = staking.snapshot().await;
    assert_eq!(snapshot.balance.eth_wei, U256::ZERO);
    assert_eq!(snapshot.contract.fee_bps, DEFAULT_FEE_BPS);
}

#[tokio::test]
async fn fee_preview_is_none_when_rpc_is_unreachable() {
    let staking = offline_staking();
    assert!(staking.calculate_fee("1").await.is_none());
    // Zero and garbage amounts fail before any network I/O.
    assert!(staking.calculate_fee("0").await.is_none());
    assert!(staking.calculate_fee("abc").await.is_none());
}

#[tokio::test]
async fn gas_estimate_uses_fallback_offline() {
    let staking = offline_staking();
    let fallback = U256::from(3u64) * U256::from(10u64).pow(U256::from(15u64));
    assert_eq!(staking.estimate_gas("1").await, fallback);
    // Unparsable and below-minimum amounts short-circuit to the fallback.
    assert_eq!(staking.estimate_gas("abc").await, fallback);
    assert_eq!(staking.estimate_gas("0.0001").await, fallback);
}

#[tokio::test]
async fn watch_only_session_cannot_stake() {
    let staking = offline_staking();
    let err = staking.stake("1").await.expect_err("should fail");
    assert!(matches!(err, StakingError::NotConnected(_)), "got: {err:?}");
}

#[tokio::test]
async fn below_minimum_stake_is_rejected_before_any_network_io() {
    let config = unreachable_config(Chain::Ethereum);
    let session = WalletSession::connect(&config, TEST_KEY).expect("session");
    let staking = StakingClient::new(session);
    let err = staking.stake("0.0005").await.expect_err("should fail");
    match err {
        StakingError::InvalidAmount(msg) => assert!(msg.contains("Minimum stake"), "got: {msg}"),
        other => panic!("expected InvalidAmount, got: {other:?}"),
    }
}

#[tokio::test]
async fn stake_with_empty_balance_is_insufficient() {
    let config = unreachable_config(Chain::Ethereum);
    let session = WalletSession::connect(&config, TEST_KEY).expect("session");
    let staking = StakingClient::new(session);
    // The balance read fails offline and counts as zero.
    let err = staking.stake("1").await.expect_err("should fail");
    assert!(
        matches!(err, StakingError::InsufficientBalance(_)),
        "got: {err:?}"
    );
}

#[tokio::test]
async fn delegate_validates_params_before_any_network_io() {
    let avalanche = offline_avalanche_signing();

    let err = avalanche.delegate("10", 90).await.expect_err("should fail");
    assert!(matches!(err, StakingError::InvalidAmount(_)), "got: {err:?}");

    let err = avalanche.delegate("25", 7).await.expect_err("should fail");
    assert!(
        matches!(err, StakingError::InvalidDuration(_)),
        "got: {err:?}"
    );

    // Both parameters invalid: the amount failure wins the classification.
    let err = avalanche.delegate("10", 7).await.expect_err("should fail");
    assert!(matches!(err, StakingError::InvalidAmount(_)), "got: {err:?}");
}

#[tokio::test]
async fn delegate_fails_on_unreachable_network() {
    let avalanche = offline_avalanche_signing();
    let err = avalanche.delegate("25", 90).await.expect_err("should fail");
    assert!(matches!(err, StakingError::Network(_)), "got: {err:?}");
}

#[tokio::test]
async fn avax_balances_degrade_to_zero() {
    let avalanche = offline_avalanche_signing();
    let balance = avalanche.fetch_balances().await;
    assert_eq!(balance.c_chain_wei, U256::ZERO);
    assert_eq!(balance.p_chain_wei, U256::ZERO);
}

// -- live-network tests ------------------------------------------------------

fn mainnet_staking() -> StakingClient {
    let config = ChainConfig {
        chain: Chain::Ethereum,
        custom_url: std::env::var("SAFESTAKING_ETH_RPC_URL").ok(),
    };
    let session = WalletSession::observe(&config, None).expect("session");
    StakingClient::new(session)
}

#[tokio::test]
#[ignore = "talks to a public Ethereum mainnet endpoint"]
async fn live_contract_stats_carry_a_real_fee() {
    let staking = mainnet_staking();
    let stats = staking.fetch_contract_stats().await;
    // The deployed contract's fee is nonzero and bounded.
    assert!(stats.fee_bps > 0 && stats.fee_bps <= 1_000, "fee_bps = {}", stats.fee_bps);
    assert_eq!(staking.fee_bps(), stats.fee_bps);
}

#[tokio::test]
#[ignore = "talks to a public Ethereum mainnet endpoint"]
async fn live_lido_pool_is_nonempty() {
    let staking = mainnet_staking();
    let stats = staking.fetch_protocol_stats().await;
    assert!(stats.total_pooled_ether_wei > U256::ZERO);
    assert!(stats.total_shares > U256::ZERO);
}

#[tokio::test]
#[ignore = "talks to a public Ethereum mainnet endpoint"]
async fn live_fee_preview_splits_the_amount() {
    let staking = mainnet_staking();
    let fee = staking.calculate_fee("1").await.expect("fee preview");
    let one_ether = U256::from(10u64).pow(U256::from(18u64));
    assert_eq!(fee.fee_wei + fee.stake_wei, one_ether);
}
