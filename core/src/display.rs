//! Output formatting — wei/decimal conversion and display helpers.
//!
//! Both chains use 18 decimal places. 1 ETH = 10^18 wei.

use alloy::primitives::U256;

use crate::avalanche::{AvaxBalance, RewardProjection};
use crate::staking::{Balance, ContractStats, FeeBreakdown, ProtocolStats, StakeReceipt, UserStats};

const DECIMALS: u32 = 18;

/// Keystroke-level guard for amount inputs: digits with at most one dot.
/// Mirrors the `^\d*\.?\d*$` check the stake forms apply.
#[must_use]
pub fn is_amount_input(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_digit() || c == '.') && input.matches('.').count() <= 1
}

/// Parse a human-readable amount string into wei.
/// Accepts: "1.5" -> 1_500_000_000_000_000_000, "0.001" -> 10^15.
#[must_use = "parsing result should be checked"]
pub fn parse_amount(input: &str) -> Result<U256, String> {
    let input = input.trim();

    if input.is_empty() {
        return Err("Amount cannot be empty".to_string());
    }
    if input.starts_with('-') {
        return Err("Amount must be positive".to_string());
    }
    if !is_amount_input(input) {
        return Err(format!(
            "Invalid amount '{input}'. Use a plain decimal like '1.5' or '0.001'."
        ));
    }
    if !input.chars().any(|c| c.is_ascii_digit()) {
        return Err("Amount must contain at least one digit".to_string());
    }

    let (whole_str, frac_str) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    let whole = if whole_str.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole_str, 10)
            .map_err(|_| format!("Invalid whole part: '{whole_str}'"))?
    };

    let frac = if frac_str.is_empty() {
        U256::ZERO
    } else if frac_str.len() > DECIMALS as usize {
        return Err("Too many decimal places. 18 are supported.".to_string());
    } else {
        // Pad to 18 digits
        let padded = format!("{frac_str:0<18}");
        U256::from_str_radix(&padded, 10)
            .map_err(|_| format!("Invalid fractional part: '{frac_str}'"))?
    };

    let scale = U256::from(10u64).pow(U256::from(DECIMALS));
    whole
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac))
        .ok_or_else(|| "Amount too large".to_string())
}

/// Convert wei to a trimmed decimal string: 1_500_000_000_000_000_000 -> "1.5".
#[must_use]
pub fn wei_to_decimal(wei: U256) -> String {
    let scale = U256::from(10u64).pow(U256::from(DECIMALS));
    let whole = wei / scale;
    let frac = wei % scale;
    if frac.is_zero() {
        return whole.to_string();
    }
    let frac_str = format!("{frac:018}");
    let trimmed = frac_str.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

#[must_use]
pub fn format_eth(wei: U256) -> String {
    format!("{} ETH", wei_to_decimal(wei))
}

#[must_use]
pub fn format_steth(wei: U256) -> String {
    format!("{} stETH", wei_to_decimal(wei))
}

#[must_use]
pub fn format_avax(wei: U256) -> String {
    format!("{} AVAX", wei_to_decimal(wei))
}

/// Trim an address or tx hash for display: first 6 + last 4 characters.
#[must_use]
pub fn short_hex(hex: &str) -> String {
    if hex.len() <= 10 {
        return hex.to_string();
    }
    format!("{}...{}", &hex[..6], &hex[hex.len() - 4..])
}

#[must_use]
pub fn format_balance(balance: &Balance) -> String {
    format!(
        "  ETH:    {}\n  stETH:  {}\n  Total:  {}",
        wei_to_decimal(balance.eth_wei),
        wei_to_decimal(balance.steth_wei),
        wei_to_decimal(balance.total_wei()),
    )
}

#[must_use]
pub fn format_user_stats(stats: &UserStats) -> String {
    format!(
        "  Staked:          {}\n  Fees paid:       {}\n  stETH received:  {}",
        format_eth(stats.staked_wei),
        format_eth(stats.fee_paid_wei),
        format_steth(stats.steth_received_wei),
    )
}

#[must_use]
pub fn format_contract_stats(stats: &ContractStats) -> String {
    format!(
        "  Total staked:       {}\n  stETH distributed:  {}\n  Fees collected:     {}\n  Users:              {}\n  Current fee:        {:.2}% ({} bps)\n  Fee receiver:       {}",
        format_eth(stats.total_staked_wei),
        format_steth(stats.total_steth_distributed_wei),
        format_eth(stats.total_fees_collected_wei),
        stats.total_users,
        stats.fee_percentage(),
        stats.fee_bps,
        stats.fee_receiver,
    )
}

#[must_use]
pub fn format_protocol_stats(stats: &ProtocolStats) -> String {
    format!(
        "  Pooled ether:  {}\n  Total shares:  {}",
        format_eth(stats.total_pooled_ether_wei),
        wei_to_decimal(stats.total_shares),
    )
}

#[must_use]
pub fn format_fee_breakdown(fee: &FeeBreakdown) -> String {
    format!(
        "  Fee:       {} ({:.2}%)\n  Staked:    {}",
        format_eth(fee.fee_wei),
        fee.fee_percentage,
        format_eth(fee.stake_wei),
    )
}

#[must_use]
pub fn format_receipt(receipt: &StakeReceipt) -> String {
    format!(
        "Stake confirmed!\n  Tx:        {}\n{}\n  stETH:     {}\n  Explorer:  {}",
        short_hex(&receipt.tx_hash),
        format_fee_breakdown(&receipt.fee),
        wei_to_decimal(receipt.steth_received_wei),
        receipt.explorer_url,
    )
}

#[must_use]
pub fn format_avax_balance(balance: &AvaxBalance) -> String {
    format!(
        "  C-Chain:  {}\n  P-Chain:  {}\n  Total:    {}",
        wei_to_decimal(balance.c_chain_wei),
        wei_to_decimal(balance.p_chain_wei),
        wei_to_decimal(balance.total_wei()),
    )
}

#[must_use]
pub fn format_rewards(amount: f64, duration_days: u32, projection: &RewardProjection) -> String {
    format!(
        "  Stake:          {amount} AVAX for {duration_days} days\n  Daily rewards:  {:.6} AVAX\n  Total rewards:  {:.6} AVAX\n  Effective APR:  {:.2}%",
        projection.daily_rewards, projection.total_rewards, projection.effective_apr,
    )
}

/// Format balance as JSON.
#[must_use]
pub fn format_balance_json(balance: &Balance) -> String {
    serde_json::json!({
        "eth": wei_to_decimal(balance.eth_wei),
        "steth": wei_to_decimal(balance.steth_wei),
        "total": wei_to_decimal(balance.total_wei()),
    })
    .to_string()
}

/// Format address as JSON.
#[must_use]
pub fn format_address_json(address: &str) -> String {
    serde_json::json!({
        "address": address,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wei(eth: u64, frac18: u128) -> U256 {
        U256::from(eth) * U256::from(10u64).pow(U256::from(18u64)) + U256::from(frac18)
    }

    #[test]
    fn amount_input_guard() {
        assert!(is_amount_input("1.5"));
        assert!(is_amount_input("0.001"));
        assert!(is_amount_input(""));
        assert!(is_amount_input("."));
        assert!(!is_amount_input("1.2.3"));
        assert!(!is_amount_input("1e5"));
        assert!(!is_amount_input("-1"));
        assert!(!is_amount_input("1,5"));
        assert!(!is_amount_input("abc"));
    }

    #[test]
    fn parse_whole_number() {
        assert_eq!(parse_amount("1").unwrap(), wei(1, 0));
    }

    #[test]
    fn parse_decimal() {
        assert_eq!(parse_amount("1.5").unwrap(), wei(1, 500_000_000_000_000_000));
    }

    #[test]
    fn parse_minimum_stake() {
        assert_eq!(parse_amount("0.001").unwrap(), wei(0, 1_000_000_000_000_000));
    }

    #[test]
    fn parse_leading_dot() {
        assert_eq!(parse_amount(".5").unwrap(), wei(0, 500_000_000_000_000_000));
    }

    #[test]
    fn parse_trailing_dot() {
        assert_eq!(parse_amount("2.").unwrap(), wei(2, 0));
    }

    #[test]
    fn parse_full_precision() {
        assert_eq!(parse_amount("0.000000000000000001").unwrap(), U256::from(1));
    }

    #[test]
    fn parse_too_many_decimals() {
        assert!(parse_amount("1.0000000000000000001").is_err());
    }

    #[test]
    fn parse_empty_fails() {
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn parse_lone_dot_fails() {
        assert!(parse_amount(".").is_err());
    }

    #[test]
    fn parse_garbage_fails() {
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("1.2.3").is_err());
    }

    #[test]
    fn parse_negative_fails() {
        assert!(parse_amount("-1").is_err());
    }

    #[test]
    fn wei_to_decimal_trims_zeros() {
        assert_eq!(wei_to_decimal(wei(1, 500_000_000_000_000_000)), "1.5");
        assert_eq!(wei_to_decimal(wei(2, 0)), "2");
        assert_eq!(wei_to_decimal(U256::ZERO), "0");
        assert_eq!(wei_to_decimal(U256::from(1)), "0.000000000000000001");
    }

    #[test]
    fn roundtrip_preserves_value() {
        for s in ["1", "1.5", "0.001", "123.456789"] {
            let parsed = parse_amount(s).unwrap();
            assert_eq!(wei_to_decimal(parsed), s);
        }
    }

    #[test]
    fn short_hex_trims_long_values() {
        let hash = "0xabc1230000000000000000000000000000000000000000000000000000ef01";
        assert_eq!(short_hex(hash), "0xabc1...ef01");
    }

    #[test]
    fn short_hex_keeps_short_values() {
        assert_eq!(short_hex("0xabc"), "0xabc");
    }

    #[test]
    fn receipt_renders_trimmed_hash() {
        let receipt = StakeReceipt {
            tx_hash: "0xabc1230000000000000000000000000000000000000000000000000000ef01".into(),
            explorer_url: "https://etherscan.io/tx/0xabc123".into(),
            fee: FeeBreakdown {
                fee_wei: wei(0, 2_000_000_000_000_000),
                stake_wei: wei(0, 98_000_000_000_000_000),
                fee_percentage: 2.0,
            },
            steth_received_wei: wei(0, 98_000_000_000_000_000),
        };
        let out = format_receipt(&receipt);
        assert!(out.contains("0xabc1...ef01"), "got: {out}");
        assert!(!out.contains("0000000000"), "full hash leaked: {out}");
    }

    #[test]
    fn format_balance_json_output() {
        let balance = Balance {
            eth_wei: wei(1, 500_000_000_000_000_000),
            steth_wei: wei(2, 0),
        };
        let v: serde_json::Value = serde_json::from_str(&format_balance_json(&balance)).unwrap();
        assert_eq!(v["eth"], "1.5");
        assert_eq!(v["steth"], "2");
        assert_eq!(v["total"], "3.5");
    }
}
