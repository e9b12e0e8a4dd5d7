//! Latent-space insights command

use analytics_lib::{FuelType, LatentSpaceAnalysis, TelemetrySample};
use anyhow::Result;
use chrono::Utc;
use colored::Colorize;
use tabled::Tabled;

use super::Context;
use crate::output::{color_insight_severity, color_risk, print_heading, print_json, print_table, OutputFormat};

/// Row for insight summary table
#[derive(Tabled)]
struct InsightRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Severity")]
    severity: String,
    #[tabled(rename = "Insight")]
    title: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

pub fn run(ctx: &Context, window: &[TelemetrySample], fuel: FuelType) -> Result<()> {
    let analysis = ctx.analyzer.latent_insights(window, fuel, Utc::now());

    match ctx.format {
        OutputFormat::Json => print_json(&analysis)?,
        OutputFormat::Table => print_insights(&analysis),
    }
    Ok(())
}

pub fn print_insights(analysis: &LatentSpaceAnalysis) {
    print_heading("Latent Space Insights");

    println!("Overall risk:           {}", color_risk(analysis.overall_risk_score));
    println!("Opportunity score:      {:.1}", analysis.opportunity_score);
    println!();

    let rows: Vec<InsightRow> = analysis
        .insights
        .iter()
        .map(|i| InsightRow {
            category: i.category.to_string(),
            severity: color_insight_severity(i.severity),
            title: i.title.clone(),
            confidence: format!("{:.0}%", i.confidence),
        })
        .collect();
    print_table(&rows, "No latent patterns detected");

    for insight in &analysis.insights {
        println!();
        println!("{} {}", insight.title.bold(), format!("[{}]", insight.category).dimmed());
        println!("{}", insight.description);
        for evidence in &insight.evidence {
            println!("  • {}", evidence);
        }
        println!("{} {}", "Action:".cyan(), insight.action_required);
        println!("{} {}", "Impact:".cyan(), insight.potential_impact);
    }

    println!();
    println!(
        "Analyzed at: {}",
        analysis.timestamp.format("%Y-%m-%d %H:%M:%S").to_string().dimmed()
    );
    println!();
}
