/// Full help text, or detailed help for a single command.
pub fn help_text(command: Option<&str>) -> String {
    match command {
        None => OVERVIEW.to_string(),
        Some(name) => match name.to_lowercase().as_str() {
            "balance" | "bal" => "balance — show ETH and stETH balances for the connected address.".into(),
            "address" | "addr" => "address — show the connected wallet address.".into(),
            "stats" => "stats — show your staked amount, fees paid and stETH received.".into(),
            "platform" => "platform — show platform totals: staked, distributed, fees, users, current fee.".into(),
            "pool" => "pool — show Lido pool totals (pooled ether, total shares).".into(),
            "fee" => "fee <amount> — preview the platform fee split for an ETH amount.".into(),
            "gas" => "gas <amount> — estimate the gas cost of staking an ETH amount.".into(),
            "stake" => "stake <amount> — stake ETH through SafeStaking (0.001 ETH minimum).\nAsks for confirmation, waits for one confirmation on chain.".into(),
            "avax" => "avax — show Avalanche C-Chain and P-Chain balances.".into(),
            "rewards" => "rewards <amount> <days> — project delegation rewards at the validator's APR.".into(),
            "delegate" => "delegate <amount> <days> — delegate AVAX to the Stakely validator\n(25 AVAX minimum, 14–365 days).".into(),
            "validator" => "validator — show the Stakely validator profile.".into(),
            "status" => "status — show session, chain and fee status.".into(),
            "help" => "help [command] — show this help, or details for one command.".into(),
            "exit" | "quit" | "q" => "exit — leave the client.".into(),
            other => format!("No help for '{other}'. Type 'help' for a list of commands."),
        },
    }
}

const OVERVIEW: &str = "\
Commands:
  balance              Show ETH and stETH balances
  address              Show the connected wallet address
  stats                Show your staking stats
  platform             Show platform statistics
  pool                 Show Lido pool totals
  fee <amount>         Preview the fee split for an amount
  gas <amount>         Estimate gas for staking an amount
  stake <amount>       Stake ETH (0.001 ETH minimum)
  avax                 Show Avalanche balances
  rewards <amt> <days> Project AVAX delegation rewards
  delegate <amt> <days> Delegate AVAX to Stakely (25 AVAX min, 14-365 days)
  validator            Show the Stakely validator profile
  status               Show session and network status
  help [command]       Show help
  exit                 Leave the client";
