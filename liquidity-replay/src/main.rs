use clap::Parser;
use log::info;
use tracing_subscriber::fmt::Subscriber;

use liquidity_core::idgen::DeterministicIdGenerator;
use liquidity_core::tracing::WithTracing;
use liquidity_core::types::MarketId;
use liquidity_engine::engine::Engine;
use liquidity_engine::snapshot::SnapshotEngine;

use crate::block::Block;
use crate::broker::LogBroker;
use crate::config::AppConfig;
use crate::replay::Replayer;
use crate::risk::{LinearRiskModel, StaticPriceMonitor};

mod block;
mod broker;
mod config;
mod replay;
mod risk;

fn main() {
    let subscriber = Subscriber::new();
    tracing::subscriber::set_global_default(subscriber).expect("setting tracing default failed");
    let args = AppArgs::parse();
    let raw_config = std::fs::read_to_string(args.config_path).expect("Cannot load configuration file");
    let config: AppConfig = serde_json::from_str(&raw_config).expect("Invalid configuration file");
    let raw_blocks = std::fs::read_to_string(args.blocks_path).expect("Cannot load block log");
    let blocks: Vec<Block> = serde_json::from_str(&raw_blocks).expect("Invalid block log");

    log4rs::init_file(args.log4rs_path, Default::default()).unwrap();

    info!("Replaying {} blocks of market {}", blocks.len(), config.market_id);

    let engine = Engine::new(
        config.liquidity,
        MarketId::from(config.market_id),
        WithTracing::wrap(LogBroker::default()),
        WithTracing::wrap(DeterministicIdGenerator::from_seed(config.id_seed.as_bytes())),
        LinearRiskModel::from(config.risk_model),
        StaticPriceMonitor::from(config.valid_price_range),
    );
    let mut replayer = Replayer::new(SnapshotEngine::new(engine));

    for block in blocks {
        let digest = replayer.apply_block(block).expect("Snapshot failed");
        println!("{}", serde_json::to_string(&digest).expect("Digest is always serializable"));
    }

    info!(
        "Done: {} events published, {} transactions rejected",
        replayer.snapshot().engine().broker().inner.published(),
        replayer.rejected()
    );
}

#[derive(Parser)]
#[command(name = "liquidity-replay")]
#[command(author = "Spectrum Labs")]
#[command(version = "1.0.0")]
#[command(about = "Deterministic replay of liquidity provisioning over a block log", long_about = None)]
struct AppArgs {
    /// Path to the JSON configuration file.
    #[arg(long, short)]
    config_path: String,
    /// Path to the JSON block log.
    #[arg(long, short)]
    blocks_path: String,
    /// Path to the log4rs YAML configuration file.
    #[arg(long, short)]
    log4rs_path: String,
}
