use anyhow::{bail, Result};

use super::Command;
use crate::display;

impl Command {
    /// Parse a command from a raw input string.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            bail!("No command entered. Type 'help' for a list of commands.");
        }

        let mut parts = input.splitn(3, char::is_whitespace);
        let cmd = parts.next().unwrap_or_default().to_lowercase();
        let arg1 = parts.next().map(|s| s.trim());
        let arg2 = parts.next().map(|s| s.trim());

        match cmd.as_str() {
            "balance" | "bal" => Ok(Command::Balance),

            "address" | "addr" => Ok(Command::Address),

            "stats" => Ok(Command::UserStats),

            "platform" => Ok(Command::PlatformStats),

            "pool" => Ok(Command::PoolStats),

            "fee" => {
                let amount = parse_amount_arg(arg1, "fee <amount>")?;
                Ok(Command::Fee { amount })
            }

            "gas" => {
                let amount = parse_amount_arg(arg1, "gas <amount>")?;
                Ok(Command::Gas { amount })
            }

            "stake" => {
                let amount = parse_amount_arg(arg1, "stake <amount>")?;
                Ok(Command::Stake { amount })
            }

            "avax" => Ok(Command::AvaxBalance),

            "rewards" => {
                let amount = parse_amount_arg(arg1, "rewards <amount> <days>")?;
                let duration_days = parse_duration_arg(arg2, "rewards <amount> <days>")?;
                Ok(Command::Rewards {
                    amount,
                    duration_days,
                })
            }

            "delegate" => {
                let amount = parse_amount_arg(arg1, "delegate <amount> <days>")?;
                let duration_days = parse_duration_arg(arg2, "delegate <amount> <days>")?;
                Ok(Command::Delegate {
                    amount,
                    duration_days,
                })
            }

            "validator" => Ok(Command::Validator),

            "status" => Ok(Command::Status),

            "help" | "?" => Ok(Command::Help {
                command: arg1.map(|s| s.to_string()),
            }),

            "exit" | "quit" | "q" => Ok(Command::Exit),

            other => bail!("Unknown command '{other}'. Type 'help' for a list of commands."),
        }
    }
}

fn parse_amount_arg(arg: Option<&str>, usage: &str) -> Result<String> {
    let amount_str = arg.ok_or_else(|| anyhow::anyhow!("Missing amount. Usage: {usage}"))?;
    let wei = display::parse_amount(amount_str)
        .map_err(|e| anyhow::anyhow!("Invalid amount '{amount_str}': {e}"))?;
    if wei.is_zero() {
        bail!("Amount must be greater than 0.");
    }
    Ok(amount_str.to_string())
}

fn parse_duration_arg(arg: Option<&str>, usage: &str) -> Result<u32> {
    let days_str = arg.ok_or_else(|| anyhow::anyhow!("Missing duration. Usage: {usage}"))?;
    days_str
        .parse::<u32>()
        .map_err(|_| anyhow::anyhow!("Invalid duration '{days_str}'. Expected a number of days."))
}
