//! Health score command

use analytics_lib::{BoilerHealthScore, TelemetrySample};
use anyhow::Result;
use colored::Colorize;

use super::Context;
use crate::output::{color_score, print_heading, print_json, OutputFormat};

pub fn run(ctx: &Context, window: &[TelemetrySample]) -> Result<()> {
    let health = ctx.analyzer.health(window);

    match ctx.format {
        OutputFormat::Json => print_json(&health)?,
        OutputFormat::Table => print_health(&health),
    }
    Ok(())
}

pub fn print_health(health: &BoilerHealthScore) {
    print_heading("Boiler Health");

    println!("{}  {}", "Overall Score:".bold(), color_score(health.overall_score));
    println!();
    println!("Pressure trend:         {}", health.trends.pressure);
    println!("Temperature trend:      {}", health.trends.temperature);
    println!("Efficiency trend:       {}", health.trends.efficiency);
    println!("Combustion:             {}", health.trends.combustion);

    if !health.latent_patterns.is_empty() {
        println!();
        println!("{}", "Latent Patterns".bold());
        println!("{}", "-".repeat(60));
        for pattern in &health.latent_patterns {
            println!("  • {}", pattern);
        }
    }

    if !health.risk_factors.is_empty() {
        println!();
        println!("{}", "Risk Factors".bold());
        println!("{}", "-".repeat(60));
        for factor in &health.risk_factors {
            println!("  • {}", factor.yellow());
        }
    }
    println!();
}
