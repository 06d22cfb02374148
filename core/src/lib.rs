//! SafeStaking client library.
//!
//! Connects a wallet to the SafeStaking wrapper contract on Ethereum
//! (fee-collecting forwarder to Lido) and to the Stakely validator on
//! Avalanche, exposing balance/statistics reads, fee and gas previews,
//! stake submission and delegation pre-flight.

pub mod avalanche;
pub mod chain;
pub mod commands;
pub mod config;
pub mod contracts;
pub mod display;
pub mod error;
pub mod session;
pub mod staking;

pub use avalanche::{AvalancheClient, AvaxBalance, RewardProjection, ValidatorProfile};
pub use chain::{validate_rpc_url, Chain, ChainConfig, NetworkDescriptor};
pub use commands::Command;
pub use config::EnvConfig;
pub use error::{Result, StakingError};
pub use session::WalletSession;
pub use staking::{
    Balance, ContractStats, FeeBreakdown, ProtocolStats, Snapshot, StakeReceipt, StakingClient,
    UserStats,
};
