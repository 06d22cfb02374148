//! Wallet session: provider + connected address for one chain.
//!
//! Key custody lives outside this crate; the session either wraps a local
//! signer handed in by the CLI or observes a bare address read-only. All
//! session state is ephemeral — nothing is persisted.

use anyhow::Context;
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use tracing::warn;

use crate::chain::{Chain, ChainConfig, NetworkDescriptor};
use crate::error::{Result, StakingError};

#[derive(Clone)]
pub struct WalletSession {
    provider: DynProvider,
    chain: Chain,
    address: Option<Address>,
    has_signer: bool,
}

impl WalletSession {
    /// Connect with a signing key. The session can read and submit.
    pub fn connect(config: &ChainConfig, private_key: &str) -> Result<Self> {
        let url = parse_rpc_url(config)?;
        let signer: PrivateKeySigner = private_key
            .trim()
            .parse()
            .map_err(|e| StakingError::InvalidState(format!("Invalid private key: {e}")))?;
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();
        Ok(Self {
            provider,
            chain: config.chain,
            address: Some(address),
            has_signer: true,
        })
    }

    /// Watch-only session: reads work, submission fails with `NotConnected`.
    pub fn observe(config: &ChainConfig, address: Option<Address>) -> Result<Self> {
        let url = parse_rpc_url(config)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self {
            provider,
            chain: config.chain,
            address,
            has_signer: false,
        })
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// The connected (or watched) address.
    pub fn address(&self) -> Result<Address> {
        self.address.ok_or_else(|| {
            StakingError::NotConnected("No wallet connected. Connect a wallet first.".into())
        })
    }

    pub fn address_opt(&self) -> Option<Address> {
        self.address
    }

    /// True only when the session can sign transactions.
    pub fn is_connected(&self) -> bool {
        self.address.is_some() && self.has_signer
    }

    /// Require a signing session before a mutating call.
    pub fn require_signer(&self) -> Result<Address> {
        let address = self.address()?;
        if !self.has_signer {
            return Err(StakingError::NotConnected(
                "Watch-only session. Reconnect with a signing key to submit transactions.".into(),
            ));
        }
        Ok(address)
    }

    /// Drop the address and signer; the provider stays usable for global reads.
    pub fn disconnect(&mut self) {
        self.address = None;
        self.has_signer = false;
    }

    /// Ensure the endpoint serves the expected chain, asking the wallet to
    /// switch (or add the network) on mismatch. Single attempt, no retry.
    pub async fn ensure_network(&self) -> bool {
        let want = self.chain.descriptor();
        let target = want.chain_id_u64();
        let current = match self.provider.get_chain_id().await {
            Ok(id) => id,
            Err(e) => {
                warn!(chain = %self.chain, error = %e, "failed to read chain id");
                return false;
            }
        };
        if current == target {
            return true;
        }
        self.switch_or_add_network(want).await
    }

    async fn switch_or_add_network(&self, want: &NetworkDescriptor) -> bool {
        let switch_params = [serde_json::json!({ "chainId": want.chain_id })];
        match self
            .provider
            .raw_request::<_, serde_json::Value>("wallet_switchEthereumChain".into(), switch_params)
            .await
        {
            Ok(_) => true,
            Err(switch_err) => {
                let msg = switch_err.to_string();
                // 4902: the wallet does not know this chain yet.
                if msg.contains("4902") || msg.to_lowercase().contains("unrecognized chain") {
                    let descriptor = match serde_json::to_value(want) {
                        Ok(v) => v,
                        Err(e) => {
                            warn!(error = %e, "failed to encode network descriptor");
                            return false;
                        }
                    };
                    match self
                        .provider
                        .raw_request::<_, serde_json::Value>(
                            "wallet_addEthereumChain".into(),
                            [descriptor],
                        )
                        .await
                    {
                        Ok(_) => true,
                        Err(add_err) => {
                            warn!(chain = %self.chain, error = %add_err, "failed to add network");
                            false
                        }
                    }
                } else {
                    warn!(chain = %self.chain, error = %switch_err, "failed to switch network");
                    false
                }
            }
        }
    }
}

fn parse_rpc_url(config: &ChainConfig) -> Result<Url> {
    let raw = config.rpc_url();
    let url = raw
        .parse::<Url>()
        .with_context(|| format!("Invalid RPC URL: {raw}"))?;
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eth_config() -> ChainConfig {
        ChainConfig {
            chain: Chain::Ethereum,
            custom_url: None,
        }
    }

    #[test]
    fn observe_without_address_is_not_connected() {
        let session = WalletSession::observe(&eth_config(), None).expect("session");
        assert!(!session.is_connected());
        assert!(matches!(
            session.address(),
            Err(StakingError::NotConnected(_))
        ));
    }

    #[test]
    fn watch_only_rejects_signing() {
        let addr = Address::ZERO;
        let session = WalletSession::observe(&eth_config(), Some(addr)).expect("session");
        assert!(!session.is_connected());
        assert_eq!(session.address().unwrap(), addr);
        assert!(matches!(
            session.require_signer(),
            Err(StakingError::NotConnected(_))
        ));
    }

    #[test]
    fn connect_with_garbage_key_fails() {
        let result = WalletSession::connect(&eth_config(), "not-a-key");
        assert!(matches!(result, Err(StakingError::InvalidState(_))));
    }

    #[test]
    fn disconnect_clears_session() {
        // Anvil's well-known test key; never used on a real network.
        let key = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let mut session = WalletSession::connect(&eth_config(), key).expect("session");
        assert!(session.is_connected());
        session.disconnect();
        assert!(!session.is_connected());
        assert!(session.address().is_err());
    }
}
