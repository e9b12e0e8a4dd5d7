//! Full report command

use analytics_lib::{FuelType, TelemetrySample};
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;

use super::{anomalies, energy, failures, health, insights, rng_from_seed, Context};
use crate::output::{print_json, OutputFormat};

/// Run every analyzer over the window
pub fn run(ctx: &Context, window: &[TelemetrySample], fuel: FuelType, seed: Option<u64>) -> Result<()> {
    let mut rng = rng_from_seed(seed);
    let report = ctx.analyzer.analyze_with_rng(window, fuel, &mut rng, Utc::now());

    match ctx.format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => {
            println!(
                "{} {} samples, fuel {}",
                "Boiler Report:".bold(),
                report.samples_analyzed,
                report.fuel_type.to_string().cyan()
            );
            println!();
            health::print_health(&report.health_score);
            energy::print_energy_loss(&report.energy_loss, &ctx.analyzer.config().costs.currency);
            failures::print_predictions(&report.failure_predictions);
            anomalies::print_anomalies(&report.anomalies);
            insights::print_insights(&report.latent_analysis);
        }
    }
    Ok(())
}
