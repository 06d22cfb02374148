//! Chain profiles and network descriptors.
//!
//! A `NetworkDescriptor` is the exact parameter object the
//! `wallet_addEthereumChain` RPC call expects, so it doubles as the static
//! profile for each supported chain.

use anyhow::{bail, Result};
use serde::Serialize;

/// Chains the client knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chain {
    Ethereum,
    Avalanche,
}

impl std::fmt::Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ethereum => write!(f, "ethereum"),
            Self::Avalanche => write!(f, "avalanche"),
        }
    }
}

/// Connection settings for one chain: the chain profile plus an optional
/// custom RPC endpoint overriding the descriptor default.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainConfig {
    pub chain: Chain,
    pub custom_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// `wallet_addEthereumChain` payload for a chain.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    /// Hex-encoded chain id, e.g. "0xa86a".
    pub chain_id: &'static str,
    pub chain_name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_urls: &'static [&'static str],
    pub block_explorer_urls: &'static [&'static str],
}

impl NetworkDescriptor {
    /// Numeric chain id decoded from the hex field.
    pub fn chain_id_u64(&self) -> u64 {
        u64::from_str_radix(self.chain_id.trim_start_matches("0x"), 16).unwrap_or(0)
    }
}

pub const ETHEREUM_MAINNET: NetworkDescriptor = NetworkDescriptor {
    chain_id: "0x1",
    chain_name: "Ethereum Mainnet",
    native_currency: NativeCurrency {
        name: "Ether",
        symbol: "ETH",
        decimals: 18,
    },
    rpc_urls: &["https://eth.llamarpc.com"],
    block_explorer_urls: &["https://etherscan.io/"],
};

pub const AVALANCHE_MAINNET: NetworkDescriptor = NetworkDescriptor {
    chain_id: "0xa86a",
    chain_name: "Avalanche Network",
    native_currency: NativeCurrency {
        name: "AVAX",
        symbol: "AVAX",
        decimals: 18,
    },
    rpc_urls: &["https://api.avax.network/ext/bc/C/rpc"],
    block_explorer_urls: &["https://snowtrace.io/"],
};

impl Chain {
    pub fn descriptor(&self) -> &'static NetworkDescriptor {
        match self {
            Self::Ethereum => &ETHEREUM_MAINNET,
            Self::Avalanche => &AVALANCHE_MAINNET,
        }
    }

    /// Block explorer link for a transaction hash. Cosmetic only.
    pub fn explorer_tx_url(&self, hash: &str) -> String {
        let base = self.descriptor().block_explorer_urls[0].trim_end_matches('/');
        format!("{base}/tx/{hash}")
    }
}

/// Reject non-HTTPS RPC URLs unless `allow_insecure` is set.
pub fn validate_rpc_url(url: &str, allow_insecure: bool) -> Result<()> {
    if url.starts_with("https://") {
        return Ok(());
    }
    if url.starts_with("http://") {
        if allow_insecure {
            return Ok(());
        }
        bail!("Refusing to connect over plain HTTP: {url}\nUse --insecure to allow unencrypted connections.");
    }
    bail!("Invalid RPC URL scheme: {url}\nExpected an https:// URL.");
}

impl ChainConfig {
    /// Resolve the effective RPC endpoint: custom URL > descriptor default.
    pub fn rpc_url(&self) -> String {
        match &self.custom_url {
            Some(url) => url.clone(),
            None => self.chain.descriptor().rpc_urls[0].to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avalanche_chain_id_decodes() {
        assert_eq!(AVALANCHE_MAINNET.chain_id_u64(), 43114);
        assert_eq!(ETHEREUM_MAINNET.chain_id_u64(), 1);
    }

    #[test]
    fn explorer_links() {
        assert_eq!(
            Chain::Ethereum.explorer_tx_url("0xabc"),
            "https://etherscan.io/tx/0xabc"
        );
        assert_eq!(
            Chain::Avalanche.explorer_tx_url("0xdef"),
            "https://snowtrace.io/tx/0xdef"
        );
    }

    #[test]
    fn descriptor_serializes_camel_case() {
        let v = serde_json::to_value(&AVALANCHE_MAINNET).unwrap();
        assert_eq!(v["chainId"], "0xa86a");
        assert_eq!(v["nativeCurrency"]["symbol"], "AVAX");
        assert_eq!(v["rpcUrls"][0], "https://api.avax.network/ext/bc/C/rpc");
    }

    #[test]
    fn custom_url_overrides_descriptor_default() {
        let config = ChainConfig {
            chain: Chain::Ethereum,
            custom_url: Some("https://example.org/rpc".to_string()),
        };
        assert_eq!(config.rpc_url(), "https://example.org/rpc");

        let config = ChainConfig {
            chain: Chain::Avalanche,
            custom_url: None,
        };
        assert_eq!(config.rpc_url(), "https://api.avax.network/ext/bc/C/rpc");
    }

    #[test]
    fn rejects_http_url_without_insecure() {
        let err = validate_rpc_url("http://localhost:8545", false)
            .err()
            .expect("should fail");
        assert!(err.to_string().contains("--insecure"));
    }

    #[test]
    fn accepts_http_url_with_insecure() {
        assert!(validate_rpc_url("http://localhost:8545", true).is_ok());
    }

    #[test]
    fn rejects_invalid_url_scheme() {
        let err = validate_rpc_url("ftp://example.com", false)
            .err()
            .expect("should fail");
        assert!(err.to_string().contains("Invalid RPC URL scheme"));
    }
}
