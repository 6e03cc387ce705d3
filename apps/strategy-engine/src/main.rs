//! Strategy Engine Binary
//!
//! Runs the strategy pipeline for one symbol and prints the report as JSON.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin strategy-engine -- chain.json analysis.json [far_chain.json]
//! ```
//!
//! # Environment Variables
//!
//! ## Optional
//! - `STRATEGY_ENGINE_CONFIG`: YAML config path (default: built-in defaults)
//! - `STRATEGY_ENGINE_ACCOUNT_CAPITAL`: account capital for sizing
//! - `RUST_LOG`: log filter, overrides `observability.logging.level`

use std::path::Path;

use anyhow::{Context, Result, bail};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use strategy_engine::observability::{MetricsConfig, init_metrics, init_tracing};
use strategy_engine::{
    AccountContext, Config, MarketAnalysis, OptionChainSnapshot, StrategyPipeline, SymbolInput,
    load_config,
};

fn main() -> Result<()> {
    load_dotenv();

    let config = match std::env::var("STRATEGY_ENGINE_CONFIG") {
        Ok(path) if !path.is_empty() => load_config(Some(&path))
            .with_context(|| format!("loading config from {path}"))?,
        _ => Config::default(),
    };

    init_tracing(&config.observability.logging).context("installing tracing subscriber")?;
    if config.observability.metrics.enabled {
        let metrics = MetricsConfig::from_settings(&config.observability.metrics)?;
        init_metrics(&metrics)?;
        tracing::info!(addr = %metrics.listen_addr, "Prometheus exporter listening");
    }

    let input = read_input()?;
    tracing::info!(symbol = %input.symbol(), "Starting strategy pipeline");

    let pipeline = StrategyPipeline::new(config);
    pipeline.configure_thread_pool()?;
    let report = pipeline.analyze(&input);

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Build the pipeline input from positional arguments and the environment.
fn read_input() -> Result<SymbolInput> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: strategy-engine <chain.json> <analysis.json> [far_chain.json]");
    }

    let chain: OptionChainSnapshot = read_json(&args[0])?;
    let analysis: MarketAnalysis = read_json(&args[1])?;
    let mut input = SymbolInput::new(chain, analysis);

    if let Some(path) = args.get(2) {
        input = input.with_far_chain(read_json(path)?);
    }

    if let Ok(capital) = std::env::var("STRATEGY_ENGINE_ACCOUNT_CAPITAL") {
        let capital: Decimal = capital
            .parse()
            .with_context(|| format!("invalid STRATEGY_ENGINE_ACCOUNT_CAPITAL '{capital}'"))?;
        input = input.with_account(AccountContext::new(capital));
    }

    Ok(input)
}

fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

/// Load .env file from current directory or any ancestor directory.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        let mut dir = cwd.as_path();
        while let Some(parent) = dir.parent() {
            let env_path = parent.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
            dir = parent;
        }
    }
}
