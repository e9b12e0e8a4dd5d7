//! Failure prediction command

use analytics_lib::{FailurePrediction, FuelType, TelemetrySample};
use anyhow::Result;
use colored::Colorize;
use tabled::Tabled;

use super::{rng_from_seed, Context};
use crate::output::{
    color_confidence_level, color_risk, print_heading, print_json, print_success, print_table,
    OutputFormat,
};

/// Row for failure prediction table
#[derive(Tabled)]
struct FailureRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Probability")]
    probability: String,
    #[tabled(rename = "Days Left")]
    days: u32,
    #[tabled(rename = "Confidence")]
    confidence: String,
}

/// Predict component failures; `seed` fixes the economizer noise term
pub fn run(ctx: &Context, window: &[TelemetrySample], fuel: FuelType, seed: Option<u64>) -> Result<()> {
    let mut rng = rng_from_seed(seed);
    let predictions = ctx.analyzer.predict_failures(window, fuel, &mut rng);

    match ctx.format {
        OutputFormat::Json => print_json(&predictions)?,
        OutputFormat::Table => print_predictions(&predictions),
    }
    Ok(())
}

pub fn print_predictions(predictions: &[FailurePrediction]) {
    print_heading("Failure Predictions");

    if predictions.is_empty() {
        print_success("No component failures predicted");
        println!();
        return;
    }

    let rows: Vec<FailureRow> = predictions
        .iter()
        .map(|p| FailureRow {
            component: p.component.clone(),
            probability: color_risk(p.failure_probability),
            days: p.days_until_failure,
            confidence: color_confidence_level(p.confidence_level),
        })
        .collect();
    print_table(&rows, "No component failures predicted");

    for prediction in predictions {
        println!("{}", prediction.component.bold());
        for indicator in &prediction.indicators {
            println!("  • {}", indicator);
        }
    }
    println!();
}
