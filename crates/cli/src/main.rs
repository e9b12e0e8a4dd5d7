//! Boiler analytics CLI
//!
//! A command-line tool for running the telemetry analytics engine over a
//! stored window of boiler samples.

mod commands;
mod input;
mod output;

use analytics_lib::{AnalyticsConfig, BoilerAnalyzer, FuelType};
use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand};
use commands::{anomalies, energy, failures, health, insights, report, Context};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Boiler telemetry analytics CLI
#[derive(Parser)]
#[command(name = "boilerctl")]
#[command(author, version, about = "CLI for boiler telemetry analytics", long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(long, short, global = true, default_value = "table")]
    pub format: output::OutputFormat,

    /// Analytics configuration file (can also be set via BOILER_CONFIG env var)
    #[arg(long, short, global = true, env = "BOILER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Telemetry window selection shared by every command
#[derive(Args)]
pub struct InputArgs {
    /// Telemetry file: a JSON array of samples or JSON lines
    #[arg(long, short)]
    pub input: PathBuf,

    /// Fuel type (coal, gas, oil, biomass); defaults to the latest sample's
    #[arg(long)]
    pub fuel: Option<FuelType>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score recent samples for anomalies
    Anomalies(InputArgs),

    /// Predict component failures
    Failures {
        #[command(flatten)]
        input: InputArgs,

        /// Seed for the economizer noise term
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Estimate energy loss and recovery potential
    Energy {
        #[command(flatten)]
        input: InputArgs,

        /// Baseline efficiency percentage (overrides configuration)
        #[arg(long)]
        baseline: Option<f64>,
    },

    /// Score overall boiler health
    Health(InputArgs),

    /// Show latent-space insights
    Insights(InputArgs),

    /// Run every analyzer
    Report {
        #[command(flatten)]
        input: InputArgs,

        /// Seed for the economizer noise term
        #[arg(long)]
        seed: Option<u64>,
    },
}

impl Commands {
    fn input(&self) -> &InputArgs {
        match self {
            Commands::Anomalies(input)
            | Commands::Health(input)
            | Commands::Insights(input)
            | Commands::Failures { input, .. }
            | Commands::Energy { input, .. }
            | Commands::Report { input, .. } => input,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    let config = AnalyticsConfig::load(cli.config.as_deref())
        .context("Failed to load analytics configuration")?;

    let args = cli.command.input();
    let window = input::load_window(&args.input)?;
    let fuel = input::resolve_fuel(&window, args.fuel)?;
    debug!(samples = window.len(), fuel = %fuel, "Loaded telemetry window");

    let ctx = Context {
        analyzer: BoilerAnalyzer::new(config),
        format: cli.format,
    };

    match &cli.command {
        Commands::Anomalies(_) => anomalies::run(&ctx, &window)?,
        Commands::Failures { seed, .. } => failures::run(&ctx, &window, fuel, *seed)?,
        Commands::Energy { baseline, .. } => energy::run(&ctx, &window, fuel, *baseline)?,
        Commands::Health(_) => health::run(&ctx, &window)?,
        Commands::Insights(_) => insights::run(&ctx, &window, fuel)?,
        Commands::Report { seed, .. } => report::run(&ctx, &window, fuel, *seed)?,
    }

    Ok(())
}
