//! chainshield command-line front end.
//!
//! ```text
//! chainshield [--config chainshield.toml] <command>
//!
//!   risk        score a transaction
//!   balance     balance of an address on one or more chains
//!   chain-info  token decimals / symbol reported by a chain
//!   probe       health of every endpoint of one or more chains
//!   monitor     periodic endpoint health checks until Ctrl-C / SIGTERM
//! ```
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

use alloy::primitives::U256;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use chainshield::amount::parse_amount_str;
use chainshield::config::{load_config_or_default, ShieldConfig};
use chainshield::health::HealthMonitor;
use chainshield::observability::{logging, metrics};
use chainshield::risk::Transaction;
use chainshield::{ChainId, Shield, Shutdown};

#[derive(Parser)]
#[command(name = "chainshield")]
#[command(version, about = "Transaction risk scoring and multi-chain balances", long_about = None)]
struct Cli {
    /// Configuration file; built-in defaults are used when it does not exist.
    #[arg(short, long, env = "CHAINSHIELD_CONFIG", default_value = "chainshield.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a transaction against the configured risk rules
    Risk {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Amount in the smallest unit (decimal or 0x hex)
        #[arg(long, value_parser = parse_amount)]
        amount: U256,
        #[arg(long, default_value = "polkadot")]
        chain: ChainId,
        #[arg(long)]
        method: Option<String>,
        #[arg(long)]
        data: Option<String>,
    },
    /// Fetch the balance of an address
    Balance {
        address: String,
        /// Chains to query (repeatable); all configured chains by default
        #[arg(long = "chain")]
        chains: Vec<ChainId>,
    },
    /// Show chain properties reported by the nodes
    ChainInfo { chain: ChainId },
    /// Probe every endpoint of the given chains (all by default)
    Probe { chains: Vec<ChainId> },
    /// Run the endpoint health monitor until interrupted
    Monitor,
}

fn parse_amount(raw: &str) -> Result<U256, String> {
    parse_amount_str(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (config, source) = load_config_or_default(&cli.config)?;
    logging::init_tracing(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %source,
        chains = config.rpc.chains.len(),
        "chainshield starting"
    );

    init_metrics(&config);

    let shield = Shield::from_config(&config)?;

    match cli.command {
        Commands::Risk {
            from,
            to,
            amount,
            chain,
            method,
            data,
        } => {
            let tx = Transaction {
                from_address: from,
                to_address: to,
                amount,
                method,
                data,
                chain,
            };
            print_json(&shield.calculate_risk(&tx))?;
        }
        Commands::Balance { address, chains } => {
            let chains = or_all_chains(chains, &config);
            print_json(&shield.get_multi_chain_balance(&address, &chains).await)?;
        }
        Commands::ChainInfo { chain } => match shield.get_chain_info(&chain).await {
            Some(info) => print_json(&info)?,
            None => return Err(format!("no endpoint of '{}' returned chain properties", chain).into()),
        },
        Commands::Probe { chains } => {
            let mut results = Vec::new();
            for chain in or_all_chains(chains, &config) {
                results.extend(shield.probe_chain(&chain).await);
            }
            print_json(&results)?;
        }
        Commands::Monitor => {
            let shutdown = Shutdown::new();
            let monitor = HealthMonitor::new(shield.client().clone(), config.health.clone());
            let task = tokio::spawn(monitor.run(shutdown.subscribe()));

            shutdown.trigger_on_signal();
            task.await?;
            tracing::info!("Shutdown complete");
        }
    }

    Ok(())
}

/// Install the Prometheus exporter when enabled; failure is logged, not fatal.
fn init_metrics(config: &ShieldConfig) {
    if !config.observability.metrics_enabled {
        return;
    }
    match config.observability.metrics_address.parse() {
        Ok(addr) => {
            if let Err(e) = metrics::init_metrics(addr) {
                tracing::error!(error = %e, "Failed to start metrics exporter");
            }
        }
        Err(_) => tracing::error!(
            metrics_address = %config.observability.metrics_address,
            "Failed to parse metrics address"
        ),
    }
}

fn or_all_chains(chains: Vec<ChainId>, config: &ShieldConfig) -> Vec<ChainId> {
    if chains.is_empty() {
        config.rpc.chains.keys().cloned().collect()
    } else {
        chains
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
