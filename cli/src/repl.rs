/// REPL shell — Reedline-based interactive staking session.
use crate::Cli;
use anyhow::Result;
use reedline::{DefaultCompleter, DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use safestaking_core::commands::Command;
use safestaking_core::display::short_hex;
use safestaking_core::{AvalancheClient, EnvConfig, StakingClient};

pub async fn run_repl(cli: &Cli) -> Result<()> {
    println!("SafeStaking v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let env = EnvConfig::from_env();
    for warning in env.warnings() {
        eprintln!("Warning: {warning}");
    }

    let (eth_session, avax_session) = cli.build_sessions()?;
    let staking = StakingClient::new(eth_session);
    let avalanche = AvalancheClient::new(avax_session);

    match staking.session().address_opt() {
        Some(address) => {
            if staking.session().is_connected() {
                println!("Wallet connected. Address: {address}");
            } else {
                println!("Watching address: {address} (read-only)");
            }
        }
        None => println!("Read-only session. Global stats only."),
    }
    println!("Type 'help' for a list of commands.");
    println!();

    let prompt_str = match staking.session().address_opt() {
        Some(address) => format!("[safestaking {}]", short_hex(&address.to_string())),
        None => "[safestaking]".to_string(),
    };
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic(prompt_str),
        DefaultPromptSegment::Empty,
    );

    let commands: Vec<String> = vec![
        "balance".into(),
        "bal".into(),
        "address".into(),
        "addr".into(),
        "stats".into(),
        "platform".into(),
        "pool".into(),
        "fee".into(),
        "gas".into(),
        "stake".into(),
        "avax".into(),
        "rewards".into(),
        "delegate".into(),
        "validator".into(),
        "status".into(),
        "help".into(),
        "exit".into(),
        "quit".into(),
        "q".into(),
    ];
    let completer = Box::new(DefaultCompleter::new(commands));
    let mut line_editor = Reedline::create().with_completer(completer);

    loop {
        match line_editor.read_line(&prompt) {
            Ok(Signal::Success(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                match Command::parse(line) {
                    Ok(Command::Exit) => {
                        println!("Goodbye.");
                        break;
                    }
                    Ok(cmd) => {
                        if let Some(prompt_msg) = cmd.confirmation_prompt() {
                            if !prompt_confirm(&prompt_msg) {
                                println!("Cancelled.");
                                continue;
                            }
                        }
                        match cmd.execute(&staking, &avalanche, false).await {
                            Ok(output) => {
                                if !output.is_empty() {
                                    println!("{output}");
                                }
                            }
                            Err(e) => {
                                eprintln!("Error: {e}");
                            }
                        }
                    }
                    Err(e) => {
                        eprintln!("{e}");
                    }
                }
            }
            Ok(Signal::CtrlD) | Ok(Signal::CtrlC) => {
                println!("Goodbye.");
                break;
            }
            Err(e) => {
                eprintln!("Input error: {e}");
                break;
            }
        }
    }

    Ok(())
}

fn prompt_confirm(prompt: &str) -> bool {
    use std::io::Write;
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush().ok();
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).is_ok() && input.trim().eq_ignore_ascii_case("y")
}
