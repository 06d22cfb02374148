//! Read paths: balances, statistics, fee previews.
//!
//! Every read degrades to a safe default on failure and logs instead of
//! propagating — only writes surface errors to the caller.

use alloy::primitives::{utils::parse_ether, U256};
use alloy::providers::Provider;
use tracing::warn;

use super::{
    Balance, ContractStats, FeeBreakdown, ProtocolStats, Snapshot, StakingClient, UserStats,
};
use crate::contracts::{ILido, ISafeStaking, SAFE_STAKING_ADDRESS, STETH_ADDRESS};
use crate::display;

impl StakingClient {
    /// Native ETH balance plus stETH token balance, fetched concurrently.
    /// Falls back to zeroes on any failure; never errors.
    pub async fn fetch_balance(&self) -> Balance {
        let Some(address) = self.session().address_opt() else {
            return Balance::default();
        };
        let provider = self.session().provider();
        let steth = ILido::new(STETH_ADDRESS, provider.clone());

        let (eth, token) = tokio::join!(provider.get_balance(address), async {
            steth.balanceOf(address).call().await
        });

        let eth_wei = match eth {
            Ok(v) => v,
            Err(e) => {
                warn!(%address, error = %e, "failed to fetch ETH balance");
                U256::ZERO
            }
        };
        let steth_wei = match token {
            Ok(v) => v,
            Err(e) => {
                warn!(%address, error = %e, "failed to fetch stETH balance");
                U256::ZERO
            }
        };

        Balance { eth_wei, steth_wei }
    }

    /// Per-address staking stats from the wrapper contract; zeroed on failure.
    pub async fn fetch_user_stats(&self) -> UserStats {
        let Some(address) = self.session().address_opt() else {
            return UserStats::default();
        };
        let contract = ISafeStaking::new(SAFE_STAKING_ADDRESS, self.session().provider().clone());
        match contract.getUserStats(address).call().await {
            Ok(stats) => UserStats {
                staked_wei: stats.stakedAmount,
                fee_paid_wei: stats.feePaid,
                steth_received_wei: stats.stethReceived,
            },
            Err(e) => {
                warn!(%address, error = %e, "failed to fetch user stats");
                UserStats::default()
            }
        }
    }

    /// Platform-wide statistics. On failure, a narrower read recovers just
    /// the fee; failing that, the hardcoded default applies. Never errors.
    pub async fn fetch_contract_stats(&self) -> ContractStats {
        let contract = ISafeStaking::new(SAFE_STAKING_ADDRESS, self.session().provider().clone());
        match contract.getContractStats().call().await {
            Ok(stats) => {
                let fee_bps = u64::try_from(stats.currentFeeBps).unwrap_or(0);
                self.remember_fee_bps(fee_bps);
                ContractStats {
                    total_staked_wei: stats.totalStaked,
                    total_fees_collected_wei: stats.totalFeesCollected,
                    total_steth_distributed_wei: stats.totalStethDistributed,
                    total_users: u64::try_from(stats.totalUsers).unwrap_or(0),
                    fee_bps,
                    fee_receiver: stats.feeReceiver,
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch contract stats, trying fee-only read");
                let fee_bps = self.recover_fee_bps().await.unwrap_or(self.fee_bps());
                self.remember_fee_bps(fee_bps);
                ContractStats::fallback(fee_bps)
            }
        }
    }

    /// Derive the fee in basis points from `calculateFee(1 ether)`.
    async fn recover_fee_bps(&self) -> Option<u64> {
        let one_ether = parse_ether("1").ok()?;
        let contract = ISafeStaking::new(SAFE_STAKING_ADDRESS, self.session().provider().clone());
        match contract.calculateFee(one_ether).call().await {
            Ok(split) => {
                let bps = split.feeAmount.saturating_mul(U256::from(10_000u64)) / one_ether;
                u64::try_from(bps).ok()
            }
            Err(e) => {
                warn!(error = %e, "fee-only read failed, keeping default fee");
                None
            }
        }
    }

    /// Lido pool totals; zeroed on failure.
    pub async fn fetch_protocol_stats(&self) -> ProtocolStats {
        let lido = ILido::new(STETH_ADDRESS, self.session().provider().clone());
        let (pooled, shares) = tokio::join!(
            async { lido.getTotalPooledEther().call().await },
            async { lido.getTotalShares().call().await },
        );
        match (pooled, shares) {
            (Ok(total_pooled_ether_wei), Ok(total_shares)) => ProtocolStats {
                total_pooled_ether_wei,
                total_shares,
            },
            (pooled, shares) => {
                if let Err(e) = &pooled {
                    warn!(error = %e, "failed to fetch pooled ether");
                }
                if let Err(e) = &shares {
                    warn!(error = %e, "failed to fetch total shares");
                }
                ProtocolStats::default()
            }
        }
    }

    /// Joint refresh of balance + user stats + contract stats. Reads run
    /// concurrently; each degrades internally, so the snapshot always lands.
    pub async fn snapshot(&self) -> Snapshot {
        let (balance, user, contract) = tokio::join!(
            self.fetch_balance(),
            self.fetch_user_stats(),
            self.fetch_contract_stats(),
        );
        Snapshot {
            balance,
            user,
            contract,
        }
    }

    /// Contract fee preview for an amount string. `None` on any failure.
    pub async fn calculate_fee(&self, amount: &str) -> Option<FeeBreakdown> {
        let wei = display::parse_amount(amount).ok()?;
        if wei.is_zero() {
            return None;
        }
        let contract = ISafeStaking::new(SAFE_STAKING_ADDRESS, self.session().provider().clone());
        match contract.calculateFee(wei).call().await {
            Ok(split) => Some(FeeBreakdown {
                fee_wei: split.feeAmount,
                stake_wei: split.stakeAmount,
                fee_percentage: self.fee_percentage(),
            }),
            Err(e) => {
                warn!(amount, error = %e, "fee calculation failed");
                None
            }
        }
    }
}
