//! Energy loss command

use analytics_lib::{EnergyLossAnalysis, FuelType, TelemetrySample};
use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::{color_loss_severity, format_currency, format_percent, print_heading, print_json, OutputFormat};

/// Analyze energy loss; `baseline` overrides the configured efficiency baseline
pub fn run(
    ctx: &Context,
    window: &[TelemetrySample],
    fuel: FuelType,
    baseline: Option<f64>,
) -> Result<()> {
    let analysis = match baseline {
        Some(baseline) => ctx.analyzer.energy_loss_with_baseline(window, baseline),
        None => ctx.analyzer.energy_loss(window, fuel),
    };

    match ctx.format {
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Table => print_energy_loss(&analysis, &ctx.analyzer.config().costs.currency),
    }
    Ok(())
}

pub fn print_energy_loss(analysis: &EnergyLossAnalysis, currency: &str) {
    print_heading("Energy Loss");

    let excess = analysis.catastrophic_energy_loss - analysis.normal_energy_loss;
    println!("Normal loss:            {}", format_percent(analysis.normal_energy_loss));
    println!("Current loss:           {}", format_percent(analysis.catastrophic_energy_loss));
    println!("Excess loss:            {}", format_percent(excess));
    println!("Severity:               {}", color_loss_severity(analysis.severity));
    println!("Driver:                 {}", analysis.loss_driver);
    println!(
        "{}     {}/month",
        "Recovery Potential:".bold(),
        format_currency(analysis.recovery_potential, currency).green().bold()
    );
    println!();
}
