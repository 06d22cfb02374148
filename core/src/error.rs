//! Domain error type for staking operations.

use thiserror::Error;

/// Typed error enum for staking operations, allowing callers to match on
/// specific failure modes instead of inspecting opaque `anyhow::Error` messages.
#[derive(Debug, Error)]
pub enum StakingError {
    /// No wallet connected (or watch-only session without a signer).
    #[error("{0}")]
    NotConnected(String),

    /// Insufficient balance for the requested operation.
    #[error("{0}")]
    InsufficientBalance(String),

    /// Invalid or below-minimum amount.
    #[error("{0}")]
    InvalidAmount(String),

    /// Delegation duration outside the allowed bounds.
    #[error("{0}")]
    InvalidDuration(String),

    /// Network or RPC communication failure.
    #[error("{0}")]
    Network(String),

    /// Transaction submission or confirmation failure.
    #[error("{0}")]
    Transaction(String),

    /// A stake submission is already in flight on this client.
    #[error("{0}")]
    Busy(String),

    /// Operation not available yet (e.g. P-Chain delegation).
    #[error("{0}")]
    Unsupported(String),

    /// Invalid client state or configuration.
    #[error("{0}")]
    InvalidState(String),

    /// Unexpected error from internal subsystems.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `std::result::Result<T, StakingError>`.
pub type Result<T> = std::result::Result<T, StakingError>;

/// Best-effort translation of a provider/transport error into a message a
/// user can act on. Falls through to the raw message when nothing matches.
pub fn describe_rpc_error(raw: &str) -> String {
    let lower = raw.to_lowercase();
    if lower.contains("user rejected") || lower.contains("user denied") {
        return "Transaction rejected by user".to_string();
    }
    if lower.contains("insufficient funds") {
        return "Insufficient funds for transaction".to_string();
    }
    if lower.contains("revert") {
        return "Transaction would revert".to_string();
    }
    if lower.contains("gas") {
        return "Gas estimation failed".to_string();
    }
    if lower.contains("network") || lower.contains("connection") || lower.contains("timed out") {
        return "Network connection error".to_string();
    }
    if raw.is_empty() {
        return "Transaction failed".to_string();
    }
    raw.to_string()
}
