//! Write path: gas estimation, balance sufficiency, stake submission.

use std::sync::atomic::{AtomicBool, Ordering};

use alloy::primitives::U256;
use alloy::providers::Provider;
use tracing::warn;

use super::{Snapshot, StakeReceipt, StakingClient, FALLBACK_GAS_WEI, MIN_STAKE_WEI};
use crate::contracts::{ISafeStaking, SAFE_STAKING_ADDRESS};
use crate::display;
use crate::error::{describe_rpc_error, Result, StakingError};

/// True when the balance covers the stake amount plus the gas allowance.
/// Equality is sufficient.
pub(crate) fn covers_required(balance: U256, amount: U256, gas: U256) -> bool {
    match amount.checked_add(gas) {
        Some(required) => balance >= required,
        None => false,
    }
}

/// Clears the in-flight flag when the stake call returns, on every path.
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl StakingClient {
    /// Gas cost estimate in wei for staking `amount`, with a 20% headroom.
    /// Any failure yields the fixed fallback; never errors.
    pub async fn estimate_gas(&self, amount: &str) -> U256 {
        let Ok(wei) = display::parse_amount(amount) else {
            return FALLBACK_GAS_WEI;
        };
        if wei < MIN_STAKE_WEI {
            return FALLBACK_GAS_WEI;
        }
        let Some(address) = self.session().address_opt() else {
            return FALLBACK_GAS_WEI;
        };

        let provider = self.session().provider();
        // Don't ask the node to estimate a call that would fail on balance.
        let balance = match provider.get_balance(address).await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "balance read failed during gas estimation");
                return FALLBACK_GAS_WEI;
            }
        };
        if wei > balance {
            return FALLBACK_GAS_WEI;
        }

        let contract = ISafeStaking::new(SAFE_STAKING_ADDRESS, provider.clone());
        let gas = match contract.stake().value(wei).from(address).estimate_gas().await {
            Ok(g) => g,
            Err(e) => {
                warn!(amount, error = %e, "gas estimation failed, using fallback");
                return FALLBACK_GAS_WEI;
            }
        };
        let gas_price = match provider.get_gas_price().await {
            Ok(p) => p,
            Err(e) => {
                warn!(error = %e, "gas price read failed, using fallback");
                return FALLBACK_GAS_WEI;
            }
        };

        U256::from(gas)
            .saturating_mul(U256::from(gas_price))
            .saturating_mul(U256::from(120u64))
            / U256::from(100u64)
    }

    /// Whether the native balance covers `amount` plus estimated gas.
    /// Below-minimum and unparsable amounts are insufficient; never errors.
    pub async fn has_sufficient_balance(&self, amount: &str) -> bool {
        let Ok(wei) = display::parse_amount(amount) else {
            return false;
        };
        if wei < MIN_STAKE_WEI {
            return false;
        }
        let Some(address) = self.session().address_opt() else {
            return false;
        };
        let balance = match self.session().provider().get_balance(address).await {
            Ok(b) => b,
            Err(e) => {
                warn!(error = %e, "balance read failed during sufficiency check");
                return false;
            }
        };
        let gas = self.estimate_gas(amount).await;
        covers_required(balance, wei, gas)
    }

    /// Submit a stake transaction and wait for one confirmation.
    ///
    /// Rejects concurrent calls on the same client: the in-flight flag, not
    /// the caller's UI, is the double-submit guard. Returns the receipt and
    /// a fresh post-stake snapshot.
    pub async fn stake(&self, amount: &str) -> Result<(StakeReceipt, Snapshot)> {
        if self
            .in_flight_flag()
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(StakingError::Busy(
                "A stake transaction is already in flight. Wait for it to confirm.".into(),
            ));
        }
        let _guard = InFlightGuard(self.in_flight_flag());

        self.session().require_signer()?;

        let wei = display::parse_amount(amount).map_err(StakingError::InvalidAmount)?;
        if wei < MIN_STAKE_WEI {
            return Err(StakingError::InvalidAmount(format!(
                "Minimum stake is {}.",
                display::format_eth(MIN_STAKE_WEI)
            )));
        }

        if !self.has_sufficient_balance(amount).await {
            return Err(StakingError::InsufficientBalance(
                "Insufficient ETH balance (including gas fees)".into(),
            ));
        }

        let fee = self
            .calculate_fee(amount)
            .await
            .ok_or_else(|| StakingError::Transaction("Failed to calculate fees".into()))?;

        let contract = ISafeStaking::new(SAFE_STAKING_ADDRESS, self.session().provider().clone());
        let pending = contract
            .stake()
            .value(wei)
            .send()
            .await
            .map_err(|e| StakingError::Transaction(describe_rpc_error(&e.to_string())))?;
        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| StakingError::Transaction(describe_rpc_error(&e.to_string())))?;
        if !receipt.status() {
            return Err(StakingError::Transaction("Transaction reverted".into()));
        }

        let tx_hash = receipt.transaction_hash.to_string();
        let explorer_url = self.chain().explorer_tx_url(&tx_hash);
        let steth_received_wei = fee.stake_wei;

        // Re-fetch everything the dashboard shows before reporting success.
        let snapshot = self.snapshot().await;

        Ok((
            StakeReceipt {
                tx_hash,
                explorer_url,
                fee,
                steth_received_wei,
            },
            snapshot,
        ))
    }
}
