//! Anomaly scoring command

use analytics_lib::{AnomalyScore, AnomalyType, TelemetrySample};
use anyhow::Result;
use tabled::Tabled;

use super::Context;
use crate::output::{color_anomaly, print_heading, print_json, print_table, print_warning, OutputFormat};

/// Row for anomaly table
#[derive(Tabled)]
struct AnomalyRow {
    #[tabled(rename = "Sample")]
    timestamp: String,
    #[tabled(rename = "Isolation")]
    isolation: String,
    #[tabled(rename = "Z-Score")]
    z_score: String,
    #[tabled(rename = "Risk")]
    risk: String,
    #[tabled(rename = "Band")]
    band: String,
}

/// Score the trailing samples of the window
pub fn run(ctx: &Context, window: &[TelemetrySample]) -> Result<()> {
    let anomalies = ctx.analyzer.detect_anomalies(window);

    match ctx.format {
        OutputFormat::Json => print_json(&anomalies)?,
        OutputFormat::Table => print_anomalies(&anomalies),
    }
    Ok(())
}

pub fn print_anomalies(anomalies: &[AnomalyScore]) {
    print_heading("Anomaly Detection");

    let rows: Vec<AnomalyRow> = anomalies
        .iter()
        .map(|a| AnomalyRow {
            timestamp: a.timestamp.clone(),
            isolation: format!("{:.1}", a.isolation_score),
            z_score: format!("{:.1}", a.z_score_deviation),
            risk: format!("{:.1}", a.overall_anomaly_risk),
            band: color_anomaly(a.anomaly_type),
        })
        .collect();
    print_table(&rows, "Not enough samples for anomaly detection (need at least 5)");

    let flagged = anomalies
        .iter()
        .filter(|a| a.anomaly_type >= AnomalyType::Severe)
        .count();
    if flagged > 0 {
        print_warning(&format!("{} sample(s) in the severe or critical band", flagged));
    }
    println!();
}
