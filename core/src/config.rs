//! Environment configuration read once at startup.
//!
//! Missing values are surfaced as warnings in the CLI banner, never as hard
//! failures — the descriptor defaults keep the client usable.

/// Env var for a custom Ethereum RPC endpoint.
pub const ETH_RPC_URL_VAR: &str = "SAFESTAKING_ETH_RPC_URL";
/// Env var for a custom Avalanche C-Chain RPC endpoint.
pub const AVAX_RPC_URL_VAR: &str = "SAFESTAKING_AVAX_RPC_URL";
/// Env var for the wallet-infrastructure environment identifier.
pub const ENVIRONMENT_ID_VAR: &str = "SAFESTAKING_ENVIRONMENT_ID";

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub eth_rpc_url: Option<String>,
    pub avax_rpc_url: Option<String>,
    pub environment_id: Option<String>,
}

impl EnvConfig {
    /// Read configuration from process environment. Empty values count as unset.
    pub fn from_env() -> Self {
        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            eth_rpc_url: read(ETH_RPC_URL_VAR),
            avax_rpc_url: read(AVAX_RPC_URL_VAR),
            environment_id: read(ENVIRONMENT_ID_VAR),
        }
    }

    /// Warnings for absent configuration, one line each.
    pub fn warnings(&self) -> Vec<String> {
        let mut out = Vec::new();
        if self.eth_rpc_url.is_none() {
            out.push(format!(
                "{ETH_RPC_URL_VAR} not set — using the public Ethereum endpoint, which may be rate limited."
            ));
        }
        if self.avax_rpc_url.is_none() {
            out.push(format!(
                "{AVAX_RPC_URL_VAR} not set — using the public Avalanche endpoint."
            ));
        }
        if self.environment_id.is_none() {
            out.push(format!(
                "{ENVIRONMENT_ID_VAR} not set — wallet environment features are disabled."
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_warns_for_every_field() {
        let config = EnvConfig::default();
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 3);
        assert!(warnings[0].contains(ETH_RPC_URL_VAR));
    }

    #[test]
    fn set_fields_do_not_warn() {
        let config = EnvConfig {
            eth_rpc_url: Some("https://example.org/rpc".into()),
            avax_rpc_url: Some("https://example.org/avax".into()),
            environment_id: Some("env-1234".into()),
        };
        assert!(config.warnings().is_empty());
    }
}
