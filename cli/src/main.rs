mod repl;

use anyhow::{bail, Context, Result};
use clap::Parser;
use safestaking_core::commands::Command;
use safestaking_core::{
    validate_rpc_url, AvalancheClient, Chain, ChainConfig, StakingClient, WalletSession,
};
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "safestaking", about = "SafeStaking — stake ETH via Lido, delegate AVAX", version)]
pub(crate) struct Cli {
    /// Custom Ethereum RPC endpoint (or set SAFESTAKING_ETH_RPC_URL)
    #[arg(long, env = "SAFESTAKING_ETH_RPC_URL")]
    rpc_url: Option<String>,

    /// Custom Avalanche C-Chain RPC endpoint (or set SAFESTAKING_AVAX_RPC_URL)
    #[arg(long, env = "SAFESTAKING_AVAX_RPC_URL")]
    avax_rpc_url: Option<String>,

    /// Watch an address read-only instead of connecting a key
    #[arg(long, conflicts_with = "key_stdin")]
    watch: Option<String>,

    /// Read the private key from stdin (for scripting)
    #[arg(long)]
    key_stdin: bool,

    /// Run a single command and exit
    #[arg(long)]
    cmd: Option<String>,

    /// Output in JSON format (useful with --cmd)
    #[arg(long)]
    json: bool,

    /// Allow connecting to non-HTTPS RPC URLs
    #[arg(long)]
    insecure: bool,
}

impl Cli {
    fn eth_config(&self) -> ChainConfig {
        ChainConfig {
            chain: Chain::Ethereum,
            custom_url: self.rpc_url.clone(),
        }
    }

    fn avax_config(&self) -> ChainConfig {
        ChainConfig {
            chain: Chain::Avalanche,
            custom_url: self.avax_rpc_url.clone(),
        }
    }

    fn validate_urls(&self) -> Result<()> {
        if let Some(url) = &self.rpc_url {
            validate_rpc_url(url, self.insecure)?;
        }
        if let Some(url) = &self.avax_rpc_url {
            validate_rpc_url(url, self.insecure)?;
        }
        Ok(())
    }

    /// Build both chain sessions from the same credential.
    fn build_sessions(&self) -> Result<(WalletSession, WalletSession)> {
        if let Some(watched) = &self.watch {
            let address = watched
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid watch address '{watched}': {e}"))?;
            let eth = WalletSession::observe(&self.eth_config(), Some(address))?;
            let avax = WalletSession::observe(&self.avax_config(), Some(address))?;
            return Ok((eth, avax));
        }

        let key = self.read_private_key()?;
        match key {
            Some(key) => {
                let eth = WalletSession::connect(&self.eth_config(), &key)?;
                let avax = WalletSession::connect(&self.avax_config(), &key)?;
                Ok((eth, avax))
            }
            None => {
                let eth = WalletSession::observe(&self.eth_config(), None)?;
                let avax = WalletSession::observe(&self.avax_config(), None)?;
                Ok((eth, avax))
            }
        }
    }

    /// Resolve the signing key: stdin flag, env var, then interactive prompt.
    /// Returns `None` when the user opts into a read-only session.
    fn read_private_key(&self) -> Result<Option<Zeroizing<String>>> {
        if self.key_stdin {
            return Ok(Some(read_key_stdin()?));
        }
        if let Ok(key) = std::env::var("SAFESTAKING_PRIVATE_KEY") {
            if !key.trim().is_empty() {
                return Ok(Some(Zeroizing::new(key)));
            }
        }
        if self.cmd.is_some() {
            // One-shot without a key runs read-only.
            return Ok(None);
        }
        let key = Zeroizing::new(
            rpassword::prompt_password("Private key (empty for read-only): ")
                .context("Failed to read private key")?,
        );
        if key.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(key))
    }
}

fn read_key_stdin() -> Result<Zeroizing<String>> {
    use zeroize::Zeroize;
    let mut key = String::new();
    std::io::stdin()
        .read_line(&mut key)
        .context("Failed to read private key from stdin")?;
    let trimmed = key.trim().to_string();
    key.zeroize();
    if trimmed.is_empty() {
        bail!("Empty private key on stdin.");
    }
    Ok(Zeroizing::new(trimmed))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.validate_urls()?;

    if let Some(cmd_str) = &cli.cmd {
        run_oneshot(&cli, cmd_str).await
    } else {
        repl::run_repl(&cli).await
    }
}

async fn run_oneshot(cli: &Cli, cmd_str: &str) -> Result<()> {
    let command = Command::parse(cmd_str)?;
    if command == Command::Exit {
        return Ok(());
    }

    let (eth_session, avax_session) = cli.build_sessions()?;
    let staking = StakingClient::new(eth_session);
    let avalanche = AvalancheClient::new(avax_session);

    let output = command.execute(&staking, &avalanche, cli.json).await?;
    if !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}
