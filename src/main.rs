//! DRZ chain parameter tool
//!
//! Runs the same startup sequence a node does (load config, build and
//! self-check every network, select one) and prints the result.

use clap::Parser;
use drz_core::config::{default_config_path, NodeConfig};
use drz_core::params::{Base58Type, NetworkContext, NetworkRegistry};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "drz-params")]
#[command(about = "Show the chain parameters a DRZ node starts with")]
struct Cli {
    /// Use the test network
    #[arg(long)]
    testnet: bool,

    /// Config file (default ~/.drz/drz.toml)
    #[arg(long)]
    conf: Option<PathBuf>,

    /// Base data directory
    #[arg(long)]
    datadir: Option<PathBuf>,

    /// Print the full parameter set as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("startup aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let conf_path = cli.conf.unwrap_or_else(default_config_path);
    let mut config = NodeConfig::load(&conf_path)?;
    if cli.testnet {
        config.testnet = true;
    }
    if cli.datadir.is_some() {
        config.datadir = cli.datadir;
    }

    let mut registry = NetworkRegistry::new()?;
    registry.select_from_flag(config.testnet)?;
    let context = registry.freeze();

    if cli.json {
        println!("{}", serde_json::to_string_pretty(context.params())?);
        return Ok(());
    }

    print_summary(&context, &config);
    Ok(())
}

fn print_summary(context: &NetworkContext, config: &NodeConfig) {
    let genesis = context.genesis_info();

    println!("Network:          {}", context.network);
    println!("Message start:    {}", hex::encode(context.message_start));
    println!("P2P port:         {}", context.default_port);
    println!("RPC port:         {}", context.rpc_port);
    println!("Data directory:   {}", config.data_dir(context).display());
    println!("PoW limit:        0x{:08x}", context.pow_limit.to_compact());
    println!("Last PoW block:   {}", context.last_pow_block);
    println!("PoS start block:  {}", context.pos_start_block);
    println!();
    println!("Genesis Block:");
    println!("  Hash:        {}", genesis.hash);
    println!("  Merkle Root: {}", genesis.merkle_root);
    println!("  Time:        {}", genesis.time);
    println!("  Bits:        0x{:08x}", genesis.bits);
    println!("  Nonce:       {}", genesis.nonce);
    println!();
    println!("Address prefixes:");
    for kind in Base58Type::ALL {
        println!("  {:<14} {}", format!("{:?}", kind), hex::encode(context.base58_prefix(kind)));
    }
    println!();
    println!("DNS seeds:   {}", context.dns_seeds.len());
    println!("Fixed seeds: {}", context.fixed_seeds.len());
}
