//! Command execution against the staking and delegation clients.

use serde_json::json;

use super::{help_text, Command};
use crate::avalanche::{self, AvalancheClient, DURATION_OPTIONS};
use crate::display;
use crate::error::Result;
use crate::staking::StakingClient;

impl Command {
    /// Execute the command and return its rendered output.
    ///
    /// Reads render their degraded fallbacks like any other result; only
    /// writes (`stake`, `delegate`) can return an error.
    pub async fn execute(
        &self,
        staking: &StakingClient,
        avalanche: &AvalancheClient,
        json_output: bool,
    ) -> Result<String> {
        match self {
            Command::Balance => {
                let balance = staking.fetch_balance().await;
                if json_output {
                    return Ok(display::format_balance_json(&balance));
                }
                Ok(format!("Balances:\n{}", display::format_balance(&balance)))
            }

            Command::Address => {
                let address = staking.session().address()?;
                let address = address.to_string();
                if json_output {
                    return Ok(display::format_address_json(&address));
                }
                Ok(format!("Address: {address}"))
            }

            Command::UserStats => {
                let stats = staking.fetch_user_stats().await;
                if json_output {
                    return Ok(json!({
                        "staked": display::wei_to_decimal(stats.staked_wei),
                        "feesPaid": display::wei_to_decimal(stats.fee_paid_wei),
                        "stethReceived": display::wei_to_decimal(stats.steth_received_wei),
                    })
                    .to_string());
                }
                Ok(format!(
                    "Your staking stats:\n{}",
                    display::format_user_stats(&stats)
                ))
            }

            Command::PlatformStats => {
                let stats = staking.fetch_contract_stats().await;
                if json_output {
                    return Ok(json!({
                        "totalStaked": display::wei_to_decimal(stats.total_staked_wei),
                        "totalFeesCollected": display::wei_to_decimal(stats.total_fees_collected_wei),
                        "totalStethDistributed": display::wei_to_decimal(stats.total_steth_distributed_wei),
                        "totalUsers": stats.total_users,
                        "feeBps": stats.fee_bps,
                        "feeReceiver": stats.fee_receiver.to_string(),
                    })
                    .to_string());
                }
                Ok(format!(
                    "Platform statistics:\n{}",
                    display::format_contract_stats(&stats)
                ))
            }

            Command::PoolStats => {
                let stats = staking.fetch_protocol_stats().await;
                if json_output {
                    return Ok(json!({
                        "totalPooledEther": display::wei_to_decimal(stats.total_pooled_ether_wei),
                        "totalShares": display::wei_to_decimal(stats.total_shares),
                    })
                    .to_string());
                }
                Ok(format!(
                    "Lido pool:\n{}",
                    display::format_protocol_stats(&stats)
                ))
            }

            Command::Fee { amount } => match staking.calculate_fee(amount).await {
                Some(fee) => {
                    if json_output {
                        return Ok(json!({
                            "fee": display::wei_to_decimal(fee.fee_wei),
                            "staked": display::wei_to_decimal(fee.stake_wei),
                            "feePercentage": fee.fee_percentage,
                        })
                        .to_string());
                    }
                    Ok(format!(
                        "Fee preview for {amount} ETH:\n{}",
                        display::format_fee_breakdown(&fee)
                    ))
                }
                None => {
                    if json_output {
                        return Ok(json!({ "error": "fee preview unavailable" }).to_string());
                    }
                    Ok("Fee preview unavailable. Check the amount and try again.".to_string())
                }
            },

            Command::Gas { amount } => {
                let gas_wei = staking.estimate_gas(amount).await;
                if json_output {
                    return Ok(json!({
                        "estimatedGas": display::wei_to_decimal(gas_wei),
                    })
                    .to_string());
                }
                Ok(format!(
                    "Estimated gas for staking {amount} ETH: {}",
                    display::format_eth(gas_wei)
                ))
            }

            Command::Stake { amount } => {
                let (receipt, snapshot) = staking.stake(amount).await?;
                if json_output {
                    return Ok(json!({
                        "txHash": receipt.tx_hash,
                        "explorerUrl": receipt.explorer_url,
                        "fee": display::wei_to_decimal(receipt.fee.fee_wei),
                        "staked": display::wei_to_decimal(receipt.fee.stake_wei),
                        "stethReceived": display::wei_to_decimal(receipt.steth_received_wei),
                        "balance": {
                            "eth": display::wei_to_decimal(snapshot.balance.eth_wei),
                            "steth": display::wei_to_decimal(snapshot.balance.steth_wei),
                        },
                    })
                    .to_string());
                }
                Ok(format!(
                    "{}\n\nUpdated balances:\n{}",
                    display::format_receipt(&receipt),
                    display::format_balance(&snapshot.balance)
                ))
            }

            Command::AvaxBalance => {
                let balance = avalanche.fetch_balances().await;
                if json_output {
                    return Ok(json!({
                        "cChain": display::wei_to_decimal(balance.c_chain_wei),
                        "pChain": display::wei_to_decimal(balance.p_chain_wei),
                        "total": display::wei_to_decimal(balance.total_wei()),
                    })
                    .to_string());
                }
                Ok(format!(
                    "AVAX balances:\n{}",
                    display::format_avax_balance(&balance)
                ))
            }

            Command::Rewards {
                amount,
                duration_days,
            } => {
                let avax: f64 = amount.parse().unwrap_or(0.0);
                let projection = avalanche::calculate_rewards(avax, *duration_days);
                if json_output {
                    return Ok(json!({
                        "dailyRewards": projection.daily_rewards,
                        "totalRewards": projection.total_rewards,
                        "effectiveApr": projection.effective_apr,
                    })
                    .to_string());
                }
                Ok(format!(
                    "Reward projection:\n{}",
                    display::format_rewards(avax, *duration_days, &projection)
                ))
            }

            Command::Delegate {
                amount,
                duration_days,
            } => {
                avalanche.delegate(amount, *duration_days).await?;
                // delegate() currently always errors before reaching here.
                Ok(String::new())
            }

            Command::Validator => {
                let validator = avalanche.validator();
                if json_output {
                    return Ok(json!({
                        "nodeId": validator.node_id,
                        "name": validator.name,
                        "minStake": validator.min_stake,
                        "minDurationDays": validator.min_duration_days,
                        "maxDurationDays": validator.max_duration_days,
                        "commission": validator.commission,
                        "platformFee": validator.platform_fee,
                        "apr": validator.apr,
                        "apy": validator.apy,
                    })
                    .to_string());
                }
                let durations: Vec<String> = DURATION_OPTIONS
                    .iter()
                    .map(|(label, days, recommended)| {
                        if *recommended {
                            format!("{label} ({days} days, recommended)")
                        } else {
                            format!("{label} ({days} days)")
                        }
                    })
                    .collect();
                Ok(format!(
                    "Validator: {}\n  Node:        {}\n  Min stake:   {} AVAX\n  Duration:    {}-{} days\n  Commission:  {:.1}%\n  Platform:    {:.1}%\n  APR:         {:.2}% (APY {:.2}%)\n  Options:     {}",
                    validator.name,
                    display::short_hex(validator.node_id),
                    validator.min_stake,
                    validator.min_duration_days,
                    validator.max_duration_days,
                    validator.commission,
                    validator.platform_fee,
                    validator.apr,
                    validator.apy,
                    durations.join(", "),
                ))
            }

            Command::Status => {
                let session = staking.session();
                let connected = session.is_connected();
                let address = session
                    .address_opt()
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "none".to_string());
                if json_output {
                    return Ok(json!({
                        "connected": connected,
                        "address": address,
                        "chain": staking.chain().to_string(),
                        "feeBps": staking.fee_bps(),
                    })
                    .to_string());
                }
                Ok(format!(
                    "Session:\n  Connected:  {}\n  Address:    {}\n  Chain:      {}\n  Fee:        {:.2}% ({} bps)",
                    if connected { "yes" } else { "watch-only / no" },
                    address,
                    staking.chain(),
                    staking.fee_percentage(),
                    staking.fee_bps(),
                ))
            }

            Command::Help { command } => Ok(help_text(command.as_deref())),

            Command::Exit => Ok(String::new()),
        }
    }
}
