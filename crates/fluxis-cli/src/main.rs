//! Fluxis CLI - create and inspect NASPIP payment tokens

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "fluxis")]
#[command(version)]
#[command(about = "Create charges and read NASPIP payment tokens")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./fluxis.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported networks and the tokens deployed on each
    Networks,

    /// Build or parse asset identifiers
    Asset {
        #[command(subcommand)]
        action: AssetAction,
    },

    /// Create a payment token for a charge
    Charge {
        /// Charge identifier (cut to 128 characters)
        #[arg(long)]
        id: String,

        /// Token symbol (USDT or USDC)
        #[arg(long, default_value = "USDT")]
        token: String,

        /// Amount with at most two decimals
        #[arg(long)]
        amount: String,

        /// Chain the payment must be made on
        #[arg(long)]
        chain: u64,

        /// Address receiving the payment
        #[arg(long)]
        recipient: String,

        /// Expiry as unix seconds
        #[arg(long)]
        expires_at: Option<i64>,
    },

    /// Decode a payment token and check it against the connected chain
    Read {
        /// The NASPIP token text
        token: String,

        /// Chain the wallet is currently connected to
        #[arg(long)]
        connected_chain: Option<u64>,
    },
}

#[derive(Subcommand)]
enum AssetAction {
    /// Build `n<network>_t<address>` for a token on a chain
    Build {
        #[arg(long)]
        token: String,
        #[arg(long)]
        chain: u64,
    },
    /// Parse an asset identifier and resolve it
    Parse { asset: String },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(config = ?cli.config, "starting fluxis");

    let config = naspip::Config::load(cli.config.as_deref()).context("loading configuration")?;
    let registry = config
        .registry()
        .context("invalid network/token tables in configuration")?;

    match cli.command {
        Commands::Networks => commands::networks::run(&registry),
        Commands::Asset { action } => match action {
            AssetAction::Build { token, chain } => {
                commands::asset::build(&registry, parse_symbol(&token)?, chain)
            }
            AssetAction::Parse { asset } => commands::asset::parse(&registry, &asset),
        },
        Commands::Charge {
            id,
            token,
            amount,
            chain,
            recipient,
            expires_at,
        } => {
            let mut charge = naspip::ChargeRequest::new(&id, parse_symbol(&token)?, &amount)?;
            if let Some(at) = expires_at {
                charge = charge.expiring_at(at);
            }
            commands::charge::run(&config, &registry, &charge, chain, &recipient).await
        }
        Commands::Read {
            token,
            connected_chain,
        } => commands::read::run(&config, &registry, &token, connected_chain).await,
    }
}

fn parse_symbol(text: &str) -> Result<naspip::TokenSymbol> {
    match text.parse() {
        Ok(symbol) => Ok(symbol),
        Err(_) => bail!("unsupported token {text:?}; expected USDT or USDC"),
    }
}
