use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use liquidity_feed_lib::{fetch_liquidity_distribution, PoolSnapshotFile, SnapshotFileSource};
use liquidity_lib::{DecimalPriceMath, LiquiditySweep};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::cli_args::{Cli, Command};
use crate::output::print_distribution;
use crate::util::{load_config, output_settings, rpc_source, tracing_subscriber_init};

mod cli_args;
mod output;
mod util;

fn parse_pool(pool: &str) -> anyhow::Result<Pubkey> {
    Pubkey::from_str(pool).with_context(|| format!("invalid pool address {}", pool))
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber_init();
    let cli = Cli::parse();

    match cli.command {
        Command::Distribution(distribution) => {
            let pool = parse_pool(&distribution.pool)?;
            let config = load_config(&distribution.rpc.config)?;
            let settings = output_settings(&distribution.output, &config.output);
            let source = rpc_source(&distribution.rpc, &config)?;
            let sweep = LiquiditySweep::new(DecimalPriceMath::with_precision(settings.precision));

            let result =
                fetch_liquidity_distribution(&source, &sweep, &pool, settings.strict).await?;
            print_distribution(&result, settings.format)?;
        }
        Command::Snapshot(snapshot) => {
            let pool = parse_pool(&snapshot.pool)?;
            let config = load_config(&snapshot.rpc.config)?;
            let source = rpc_source(&snapshot.rpc, &config)?;

            let file = PoolSnapshotFile::capture(&source, &pool).await?;
            file.save(&snapshot.out)?;
            info!(%pool, out = %snapshot.out, "snapshot written");
        }
        Command::Replay(replay) => {
            let config = load_config(&replay.config)?;
            let settings = output_settings(&replay.output, &config.output);
            let source = SnapshotFileSource::load(&replay.snapshot)?;
            let sweep = LiquiditySweep::new(DecimalPriceMath::with_precision(settings.precision));

            let result =
                fetch_liquidity_distribution(&source, &sweep, &source.pool(), settings.strict)
                    .await?;
            print_distribution(&result, settings.format)?;
        }
    }

    Ok(())
}
