//! Avalanche delegation client: network switching, C-Chain balance reads,
//! reward projections and parameter validation for the Stakely validator.

use alloy::primitives::U256;
use alloy::providers::Provider;
use tracing::warn;

use crate::display;
use crate::error::{Result, StakingError};
use crate::session::WalletSession;

/// The fixed validator all delegations target.
pub const STAKELY_VALIDATOR_ID: &str = "NodeID-6na5rkzi37wtt5piHV62y11XYfN2kTsTH";

/// Minimum delegation: 25 AVAX.
pub const MIN_STAKE_AVAX_WEI: U256 = U256::from_limbs([6_553_255_926_290_448_384, 1, 0, 0]);

/// Conservative gas allowance for the delegation transaction: 0.002 AVAX.
pub const GAS_ALLOWANCE_AVAX_WEI: U256 = U256::from_limbs([2_000_000_000_000_000, 0, 0, 0]);

/// Static profile of the Stakely validator.
#[derive(Debug, Clone)]
pub struct ValidatorProfile {
    pub node_id: &'static str,
    pub name: &'static str,
    /// Minimum delegation in whole AVAX.
    pub min_stake: u64,
    pub min_duration_days: u32,
    pub max_duration_days: u32,
    /// Validator commission, percent.
    pub commission: f64,
    /// SafeStaking platform fee, percent.
    pub platform_fee: f64,
    pub apr: f64,
    pub apy: f64,
}

pub const STAKELY: ValidatorProfile = ValidatorProfile {
    node_id: STAKELY_VALIDATOR_ID,
    name: "Stakely",
    min_stake: 25,
    min_duration_days: 14,
    max_duration_days: 365,
    commission: 5.0,
    platform_fee: 0.0,
    apr: 6.72,
    apy: 6.94,
};

/// Duration choices offered by the stake form; 90 days is the recommended one.
pub const DURATION_OPTIONS: &[(&str, u32, bool)] = &[
    ("2 weeks", 14, false),
    ("1 month", 30, false),
    ("3 months", 90, true),
    ("6 months", 180, false),
    ("1 year", 365, false),
];

/// C-Chain + P-Chain balances. The P-Chain value is a placeholder of zero
/// until a PlatformVM API integration exists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvaxBalance {
    pub c_chain_wei: U256,
    pub p_chain_wei: U256,
}

impl AvaxBalance {
    pub fn total_wei(&self) -> U256 {
        self.c_chain_wei.saturating_add(self.p_chain_wei)
    }
}

/// Projection from the static APR; display-only, not authoritative.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardProjection {
    pub daily_rewards: f64,
    pub total_rewards: f64,
    pub effective_apr: f64,
}

/// Outcome of parameter validation; submission is blocked unless valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub errors: Vec<String>,
    amount_ok: bool,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether the amount itself passed; distinguishes amount failures from
    /// duration-only failures.
    pub fn amount_ok(&self) -> bool {
        self.amount_ok
    }
}

/// Pure reward math: daily = amount * APR/100/365, total = daily * days.
pub fn calculate_rewards(amount: f64, duration_days: u32) -> RewardProjection {
    if amount <= 0.0 || duration_days == 0 {
        return RewardProjection {
            daily_rewards: 0.0,
            total_rewards: 0.0,
            effective_apr: 0.0,
        };
    }
    let yearly_rewards = amount * (STAKELY.apr / 100.0);
    let daily_rewards = yearly_rewards / 365.0;
    let total_rewards = daily_rewards * duration_days as f64;
    let effective_apr = (total_rewards / amount) * (365.0 / duration_days as f64) * 100.0;
    RewardProjection {
        daily_rewards,
        total_rewards,
        effective_apr,
    }
}

/// Check amount and duration against the validator's static bounds.
pub fn validate_params(amount: &str, duration_days: u32) -> Validation {
    let mut errors = Vec::new();
    let mut amount_ok = true;

    match display::parse_amount(amount) {
        Err(_) => {
            errors.push("Please enter a valid amount".to_string());
            amount_ok = false;
        }
        Ok(wei) => {
            if wei < MIN_STAKE_AVAX_WEI {
                errors.push(format!("Minimum stake is {} AVAX", STAKELY.min_stake));
                amount_ok = false;
            }
        }
    }

    if duration_days < STAKELY.min_duration_days {
        errors.push(format!(
            "Minimum duration is {} days",
            STAKELY.min_duration_days
        ));
    } else if duration_days > STAKELY.max_duration_days {
        errors.push(format!(
            "Maximum duration is {} days",
            STAKELY.max_duration_days
        ));
    }

    Validation { errors, amount_ok }
}

pub struct AvalancheClient {
    session: WalletSession,
}

impl AvalancheClient {
    pub fn new(session: WalletSession) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn validator(&self) -> &'static ValidatorProfile {
        &STAKELY
    }

    /// Switch (or add) the Avalanche network in the wallet. Single attempt.
    pub async fn ensure_network(&self) -> bool {
        self.session.ensure_network().await
    }

    /// C-Chain balance for the session address; the P-Chain side stays zero.
    /// A failed read degrades to zero with a log; never errors.
    pub async fn fetch_balances(&self) -> AvaxBalance {
        let Some(address) = self.session.address_opt() else {
            return AvaxBalance::default();
        };
        let c_chain_wei = match self.session.provider().get_balance(address).await {
            Ok(v) => v,
            Err(e) => {
                warn!(%address, error = %e, "failed to fetch C-Chain balance");
                U256::ZERO
            }
        };
        AvaxBalance {
            c_chain_wei,
            p_chain_wei: U256::ZERO,
        }
    }

    /// Whether the C-Chain balance covers `amount` plus the gas allowance.
    pub async fn has_sufficient_balance(&self, amount: &str) -> bool {
        let Ok(wei) = display::parse_amount(amount) else {
            return false;
        };
        let balance = self.fetch_balances().await;
        match wei.checked_add(GAS_ALLOWANCE_AVAX_WEI) {
            Some(required) => balance.c_chain_wei >= required,
            None => false,
        }
    }

    /// Delegate to the Stakely validator.
    ///
    /// Runs the full pre-flight (params, network, balance) and then fails:
    /// the P-Chain submission path does not exist yet, and fabricating a
    /// transaction id would be worse than saying so.
    pub async fn delegate(&self, amount: &str, duration_days: u32) -> Result<()> {
        self.session.require_signer()?;

        let validation = validate_params(amount, duration_days);
        if !validation.is_valid() {
            let message = validation.errors.join(", ");
            // Amount failures take precedence over duration-only ones.
            if validation.amount_ok() {
                return Err(StakingError::InvalidDuration(message));
            }
            return Err(StakingError::InvalidAmount(message));
        }

        if !self.ensure_network().await {
            return Err(StakingError::Network(
                "Failed to connect to Avalanche network".into(),
            ));
        }

        if !self.has_sufficient_balance(amount).await {
            return Err(StakingError::InsufficientBalance(
                "Insufficient AVAX balance for staking and gas fees".into(),
            ));
        }

        Err(StakingError::Unsupported(
            "P-Chain delegation is not implemented yet; no transaction was submitted.".into(),
        ))
    }
}
