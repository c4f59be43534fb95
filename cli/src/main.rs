//! Moracat CLI
//!
//! Operator tooling for the subscription pricing engine.
//!
//! # Usage
//!
//! ```bash
//! moracat quote --tier basic --cat adult
//! moracat quote --tier luxury --cat multiCat --duration 3 --addon toy=2 --allow-invalid
//! moracat tiers --cat senior --format json
//! moracat savings --spend 400 --tier premium
//! moracat features --tier ultimate --lang ar
//! moracat config show
//! ```

use clap::{Parser, Subcommand};
use moracat_pricing::cost_plus::CatProfile;
use moracat_pricing::{CatType, Language, Tier};
use rust_decimal::Decimal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod output;

#[derive(Parser)]
#[command(name = "moracat")]
#[command(author = "Moracat")]
#[command(version)]
#[command(about = "Moracat subscription pricing", long_about = None)]
struct Cli {
    /// Output format
    #[arg(long, short, global = true)]
    format: Option<output::OutputFormat>,

    /// Display language (en, ar)
    #[arg(long, global = true, env = "MORACAT_LANG")]
    lang: Option<Language>,

    /// Engine configuration file (TOML)
    #[arg(long, global = true, env = "MORACAT_ENGINE_CONFIG")]
    config: Option<PathBuf>,

    /// Profile name from config file
    #[arg(long, short, global = true)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a box with the cost-plus engine
    Quote {
        #[arg(long)]
        tier: Tier,
        /// Household profile: kitten, adult, senior, multiCat, multiCatLarge
        #[arg(long)]
        cat: CatProfile,
        /// Commitment in months (1, 3, 6, 12)
        #[arg(long, default_value_t = 1)]
        duration: u32,
        /// Add-on as id=quantity, repeatable
        #[arg(long = "addon")]
        add_ons: Vec<String>,
        /// Print the quote even when it is below the margin floor
        #[arg(long)]
        allow_invalid: bool,
    },
    /// Fixed retail price for one tier
    Retail {
        #[arg(long)]
        tier: Tier,
        /// adult, kitten, senior, multiCat
        #[arg(long, default_value = "adult")]
        cat: CatType,
    },
    /// Retail prices for every tier
    Tiers {
        #[arg(long, default_value = "adult")]
        cat: CatType,
    },
    /// Compare a tier against current monthly spend
    Savings {
        /// Current monthly spend in SAR
        #[arg(long)]
        spend: Decimal,
        #[arg(long)]
        tier: Tier,
        #[arg(long, default_value = "adult")]
        cat: CatType,
    },
    /// Feature list for a tier
    Features {
        #[arg(long)]
        tier: Tier,
    },
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective engine configuration
    Show,
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = config::Config::load(cli.profile.as_deref())?;
    let ctx = commands::Context::new(&settings, cli.config, cli.lang, cli.format)?;

    match cli.command {
        Commands::Quote {
            tier,
            cat,
            duration,
            add_ons,
            allow_invalid,
        } => commands::quote::handle(&ctx, tier, cat, duration, &add_ons, allow_invalid),
        Commands::Retail { tier, cat } => commands::retail::retail(&ctx, tier, cat),
        Commands::Tiers { cat } => commands::retail::tiers(&ctx, cat),
        Commands::Savings { spend, tier, cat } => commands::retail::savings(&ctx, spend, tier, cat),
        Commands::Features { tier } => commands::retail::features(&ctx, tier),
        Commands::Config { action } => commands::config::handle(&ctx, action),
    }
}
