//! Command definitions, parsing and execution for the REPL and one-shot mode.
mod execute;
mod help;
mod parse;

pub use help::help_text;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Show ETH + stETH balances
    Balance,
    /// Show the connected wallet address
    Address,
    /// Show the connected address's staking stats
    UserStats,
    /// Show platform-wide contract statistics
    PlatformStats,
    /// Show Lido pool totals
    PoolStats,
    /// Preview the fee split: fee <amount>
    Fee { amount: String },
    /// Estimate gas for a stake: gas <amount>
    Gas { amount: String },
    /// Stake ETH through the wrapper contract: stake <amount>
    Stake { amount: String },
    /// Show Avalanche balances
    AvaxBalance,
    /// Project delegation rewards: rewards <amount> <days>
    Rewards { amount: String, duration_days: u32 },
    /// Delegate AVAX to the Stakely validator: delegate <amount> <days>
    Delegate { amount: String, duration_days: u32 },
    /// Show the Stakely validator profile
    Validator,
    /// Show session and network status
    Status,
    /// Print help
    Help { command: Option<String> },
    /// Exit the client
    Exit,
}

impl Command {
    /// Returns a confirmation prompt if this command should ask before executing.
    pub fn confirmation_prompt(&self) -> Option<String> {
        match self {
            Command::Stake { amount } => Some(format!("Stake {amount} ETH with SafeStaking?")),
            Command::Delegate {
                amount,
                duration_days,
            } => Some(format!(
                "Delegate {amount} AVAX to Stakely for {duration_days} days?"
            )),
            _ => None,
        }
    }
}
