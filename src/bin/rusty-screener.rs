//! rusty-screener CLI - rank tickers and tag trends from local data files
//!
//! ## Example Usage
//!
//! ```bash
//! # Rank a universe and print JSON
//! rusty-screener rank --fundamentals fundamentals.json --quotations quotations.csv --pretty
//!
//! # Write to a file with a custom configuration
//! rusty-screener --config screener.toml rank -f f.csv -q q.csv -o indicators.json
//!
//! # Show the effective configuration
//! rusty-screener config
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rusty_screener::config::StrategyConfig;
use rusty_screener::data;
use rusty_screener::strategy::Strategy;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

/// rusty-screener: composite fundamental ranking with trend signals
#[derive(Parser)]
#[command(name = "rusty-screener")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Composite fundamental ranking with trend signals", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute ranked indicators
    Rank {
        /// Fundamentals file (.json or .csv)
        #[arg(short = 'f', long)]
        fundamentals: PathBuf,

        /// Quotations file (.json or .csv), chronological per ticker
        #[arg(short = 'q', long)]
        quotations: PathBuf,

        /// Output file for the JSON result (stdout if omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON
        #[arg(long)]
        pretty: bool,

        /// Print a plain table instead of JSON
        #[arg(long, conflicts_with = "output")]
        table: bool,

        /// Override the benchmark ticker
        #[arg(long)]
        market_ticker: Option<String>,
    },

    /// Print the effective configuration as TOML
    Config,
}

struct RankConfig {
    fundamentals: PathBuf,
    quotations: PathBuf,
    output: Option<PathBuf>,
    pretty: bool,
    table: bool,
    verbose: bool,
    strategy: StrategyConfig,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let strategy = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Rank {
            fundamentals,
            quotations,
            output,
            pretty,
            table,
            market_ticker,
        } => {
            let mut strategy = strategy;
            if let Some(ticker) = market_ticker {
                strategy.market_ticker = ticker;
            }
            run_rank(RankConfig {
                fundamentals,
                quotations,
                output,
                pretty,
                table,
                verbose: cli.verbose,
                strategy,
            })
        }
        Commands::Config => show_config(&strategy),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// Explicit path, then `~/.rusty-screener/config.toml`, then defaults
fn load_config(path: Option<&Path>) -> Result<StrategyConfig> {
    if let Some(config_path) = path {
        return StrategyConfig::load(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()));
    }

    if let Some(home) = dirs::home_dir() {
        let default_config = home.join(".rusty-screener").join("config.toml");
        if default_config.exists() {
            return StrategyConfig::load(&default_config)
                .with_context(|| format!("Failed to load config {}", default_config.display()));
        }
    }

    Ok(StrategyConfig::default())
}

fn run_rank(config: RankConfig) -> Result<()> {
    let started = Instant::now();

    let fundamentals = data::load_fundamentals(&config.fundamentals)
        .with_context(|| format!("Failed to load {}", config.fundamentals.display()))?;
    let quotations = data::load_quotations(&config.quotations)
        .with_context(|| format!("Failed to load {}", config.quotations.display()))?;

    if config.verbose {
        eprintln!(
            "{} {} fundamentals, {} quotations",
            "Loaded".cyan().bold(),
            fundamentals.len(),
            quotations.len()
        );
    }

    let strategy = Strategy::new(config.strategy)?;
    let indicators = strategy.get_indicators(&fundamentals, &quotations)?;

    if config.table {
        for row in &indicators {
            println!("{}", row);
        }
    } else {
        let json = data::indicators_to_json(&indicators, config.pretty)?;
        match &config.output {
            Some(path) => {
                fs::write(path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                eprintln!(
                    "{} {} indicators to {}",
                    "Wrote".green().bold(),
                    indicators.len(),
                    path.display()
                );
            }
            None => println!("{}", json),
        }
    }

    if config.verbose {
        eprintln!(
            "{} in {:.2?}",
            "Done".green().bold(),
            started.elapsed()
        );
    }
    Ok(())
}

fn show_config(config: &StrategyConfig) -> Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
