//! Ethereum staking client for the SafeStaking wrapper contract.
mod reads;
mod submit;

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use alloy::primitives::{Address, U256};

use crate::chain::Chain;
use crate::session::WalletSession;

/// Fee applied when the contract cannot be reached: 200 bps = 2.0%.
pub const DEFAULT_FEE_BPS: u64 = 200;

/// Contract-enforced minimum stake: 0.001 ETH.
pub const MIN_STAKE_WEI: U256 = U256::from_limbs([1_000_000_000_000_000, 0, 0, 0]);

/// Gas cost assumed when estimation fails: 0.003 ETH.
pub const FALLBACK_GAS_WEI: U256 = U256::from_limbs([3_000_000_000_000_000, 0, 0, 0]);

pub struct StakingClient {
    session: WalletSession,
    /// Last fee observed on chain, in basis points.
    fee_bps: AtomicU64,
    /// In-flight stake guard; a second `stake()` fails fast while set.
    staking: AtomicBool,
}

impl StakingClient {
    pub fn new(session: WalletSession) -> Self {
        Self {
            session,
            fee_bps: AtomicU64::new(DEFAULT_FEE_BPS),
            staking: AtomicBool::new(false),
        }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn chain(&self) -> Chain {
        self.session.chain()
    }

    /// Last observed fee in basis points.
    pub fn fee_bps(&self) -> u64 {
        self.fee_bps.load(Ordering::Relaxed)
    }

    /// Display percentage derived from basis points.
    pub fn fee_percentage(&self) -> f64 {
        self.fee_bps() as f64 / 100.0
    }

    pub(crate) fn remember_fee_bps(&self, bps: u64) {
        self.fee_bps.store(bps, Ordering::Relaxed);
    }

    pub(crate) fn in_flight_flag(&self) -> &AtomicBool {
        &self.staking
    }
}

/// Native + derived-token balances for the connected address.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Balance {
    pub eth_wei: U256,
    pub steth_wei: U256,
}

impl Balance {
    pub fn total_wei(&self) -> U256 {
        self.eth_wei.saturating_add(self.steth_wei)
    }
}

/// Per-address projection of the wrapper contract's accounting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserStats {
    pub staked_wei: U256,
    pub fee_paid_wei: U256,
    pub steth_received_wei: U256,
}

/// Wallet-agnostic platform statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractStats {
    pub total_staked_wei: U256,
    pub total_fees_collected_wei: U256,
    pub total_steth_distributed_wei: U256,
    pub total_users: u64,
    pub fee_bps: u64,
    pub fee_receiver: Address,
}

impl ContractStats {
    pub fn fee_percentage(&self) -> f64 {
        self.fee_bps as f64 / 100.0
    }

    pub(crate) fn fallback(fee_bps: u64) -> Self {
        Self {
            total_staked_wei: U256::ZERO,
            total_fees_collected_wei: U256::ZERO,
            total_steth_distributed_wei: U256::ZERO,
            total_users: 0,
            fee_bps,
            fee_receiver: Address::ZERO,
        }
    }
}

impl Default for ContractStats {
    fn default() -> Self {
        Self::fallback(DEFAULT_FEE_BPS)
    }
}

/// Lido pool totals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProtocolStats {
    pub total_pooled_ether_wei: U256,
    pub total_shares: U256,
}

/// Client-side preview of the contract's fee split.
#[derive(Debug, Clone, PartialEq)]
pub struct FeeBreakdown {
    pub fee_wei: U256,
    pub stake_wei: U256,
    pub fee_percentage: f64,
}

/// Result of one successful stake submission. Displayed once, never stored.
#[derive(Debug, Clone)]
pub struct StakeReceipt {
    pub tx_hash: String,
    pub explorer_url: String,
    pub fee: FeeBreakdown,
    pub steth_received_wei: U256,
}

/// One joint refresh of all dashboard reads.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub balance: Balance,
    pub user: UserStats,
    pub contract: ContractStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wei_constants_match_documented_amounts() {
        assert_eq!(MIN_STAKE_WEI, U256::from(10u64).pow(U256::from(15u64)));
        assert_eq!(
            FALLBACK_GAS_WEI,
            U256::from(3u64) * U256::from(10u64).pow(U256::from(15u64))
        );
    }

    #[test]
    fn default_fee_is_two_percent() {
        let stats = ContractStats::default();
        assert_eq!(stats.fee_bps, DEFAULT_FEE_BPS);
        assert!((stats.fee_percentage() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn balance_total_saturates() {
        let balance = Balance {
            eth_wei: U256::MAX,
            steth_wei: U256::from(1),
        };
        assert_eq!(balance.total_wei(), U256::MAX);
    }
}
