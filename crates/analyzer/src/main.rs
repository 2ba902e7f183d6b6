//! Liquidity Analyzer
//!
//! Loads a pool from an offline state fixture and answers two questions: how
//! much of one token it takes to push the pool to a target price, and what a
//! liquidity position over a tick range is worth at the current price.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use liquidity_sdk::{create_example_config, FixtureSource, LiquidityPool, SdkConfig};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "liquidity-analyzer")]
#[command(about = "Price impact and position valuation for concentrated-liquidity pools")]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "analyzer.toml")]
    config: PathBuf,

    /// Pool state fixture, overriding `fixture_path` from the config
    #[arg(short, long)]
    fixture: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write an example configuration file and exit
    InitConfig {
        /// Output path
        #[arg(default_value = "analyzer.toml")]
        path: PathBuf,
    },

    /// Print the current pool state
    State,

    /// Amount of token0 or token1 needed to move the pool to a target price
    Target(TargetArgs),

    /// Token amounts of a liquidity position at the current price
    Position(PositionArgs),
}

#[derive(Args)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Target sqrt price
    #[arg(long)]
    sqrt_price: Option<f64>,

    /// Target price
    #[arg(long)]
    price: Option<f64>,

    /// Target as a percentage change of the current price
    #[arg(long, allow_negative_numbers = true)]
    pct: Option<f64>,
}

#[derive(Args)]
struct PositionArgs {
    /// Position liquidity
    #[arg(long)]
    liquidity: u128,

    /// Lower tick, inclusive
    #[arg(long, allow_negative_numbers = true)]
    tick_lower: i32,

    /// Upper tick, exclusive
    #[arg(long, allow_negative_numbers = true)]
    tick_upper: i32,

    /// Token0 decimals
    #[arg(long, default_value = "18")]
    decimals0: u8,

    /// Token1 decimals
    #[arg(long, default_value = "18")]
    decimals1: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Command::InitConfig { path } = &cli.command {
        create_example_config(path)
            .with_context(|| format!("Failed to write example config {}", path.display()))?;
        info!("Wrote example configuration to {}", path.display());
        return Ok(());
    }

    let config = SdkConfig::load(&cli.config)?;
    info!("Pool: {}", config.pool_address);
    info!("Tick lens: {}", config.tick_lens_address);

    let fixture = match cli.fixture.as_ref().or(config.fixture_path.as_ref()) {
        Some(path) => path.clone(),
        None => bail!("No pool state fixture given; pass --fixture or set fixture_path"),
    };
    debug!("Fixture: {}", fixture.display());

    let source = FixtureSource::from_path(&fixture)
        .with_context(|| format!("Failed to load fixture {}", fixture.display()))?;
    let mut pool = LiquidityPool::new(source, &config)?;

    let output = match cli.command {
        Command::InitConfig { .. } => return Ok(()),
        Command::State => {
            let state = pool.state();
            json!({
                "pool": pool.address(),
                "token0": state.token0,
                "token1": state.token1,
                "fee": state.fee,
                "tick": state.snapshot.tick,
                "tick_spacing": state.snapshot.tick_spacing,
                "liquidity": state.snapshot.liquidity.to_string(),
                "sqrt_price_x96": state.snapshot.sqrt_price_x96.to_string(),
                "price": state.snapshot.price(),
            })
        }
        Command::Target(args) => {
            let target_sqrt_price = target_sqrt_price(&args, pool.snapshot().sqrt_price())?;
            let quote = pool.tokens_to_target_price(target_sqrt_price)?;
            let token = match quote.asset {
                liquidity_sdk::PurchasedAsset::Token0 => Some(pool.state().token0.as_str()),
                liquidity_sdk::PurchasedAsset::Token1 => Some(pool.state().token1.as_str()),
                liquidity_sdk::PurchasedAsset::None => None,
            };
            json!({
                "current_sqrt_price": pool.snapshot().sqrt_price(),
                "target_sqrt_price": target_sqrt_price,
                "target_price": target_sqrt_price * target_sqrt_price,
                "amount": quote.amount,
                "asset": quote.asset,
                "token": token,
                "ticks_crossed": quote.ticks_crossed,
                "final_tick_lower": quote.final_tick_lower,
                "final_tick_upper": quote.final_tick_upper,
                "final_liquidity": quote.final_liquidity.to_string(),
            })
        }
        Command::Position(args) => {
            let amounts = pool.position_amounts(
                args.liquidity,
                args.tick_lower,
                args.tick_upper,
                args.decimals0,
                args.decimals1,
            )?;
            json!({
                "tick_lower": args.tick_lower,
                "tick_upper": args.tick_upper,
                "current_tick": pool.snapshot().tick,
                "amount0": amounts.amount0,
                "amount1": amounts.amount1,
                "amount0_adjusted": amounts.amount0_adjusted,
                "amount1_adjusted": amounts.amount1_adjusted,
            })
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Resolve the requested target into a sqrt price
fn target_sqrt_price(args: &TargetArgs, current_sqrt_price: f64) -> Result<f64> {
    if let Some(sqrt_price) = args.sqrt_price {
        return Ok(sqrt_price);
    }

    if let Some(price) = args.price {
        if !price.is_finite() || price < 0.0 {
            bail!("Target price must be finite and non-negative, got {}", price);
        }
        return Ok(price.sqrt());
    }

    if let Some(pct) = args.pct {
        let ratio = 1.0 + pct / 100.0;
        if !ratio.is_finite() || ratio < 0.0 {
            bail!("Invalid price change of {}%", pct);
        }
        return Ok(current_sqrt_price * ratio.sqrt());
    }

    bail!("One of --sqrt-price, --price or --pct is required")
}

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("liquidity_analyzer={0},liquidity_sdk={0}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
