//! Output formatting utilities

use analytics_lib::{AnomalyType, ConfidenceLevel, InsightSeverity, LossSeverity};
use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// Print a rounded table, or a notice when there are no rows
pub fn print_table<T: Tabled>(rows: &[T], empty_message: &str) {
    if rows.is_empty() {
        print_info(empty_message);
        return;
    }
    let table = Table::new(rows).with(Style::rounded()).to_string();
    println!("{}", table);
}

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a section heading with an underline
pub fn print_heading(title: &str) {
    println!("{}", title.bold());
    println!("{}", "=".repeat(60));
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "⚠".yellow().bold(), message);
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Format currency
pub fn format_currency(amount: f64, currency: &str) -> String {
    match currency {
        "INR" => format!("₹{:.2} lakhs", amount / 100_000.0),
        "USD" => format!("${:.2}", amount),
        "EUR" => format!("€{:.2}", amount),
        "GBP" => format!("£{:.2}", amount),
        _ => format!("{:.2} {}", amount, currency),
    }
}

/// Format a 0-100 value as a percentage
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

pub fn color_anomaly(anomaly: AnomalyType) -> String {
    let label = anomaly.to_string();
    match anomaly {
        AnomalyType::Normal => label.green().to_string(),
        AnomalyType::Mild => label.normal().to_string(),
        AnomalyType::Moderate => label.yellow().to_string(),
        AnomalyType::Severe => label.red().to_string(),
        AnomalyType::Critical => label.red().bold().to_string(),
    }
}

pub fn color_insight_severity(severity: InsightSeverity) -> String {
    let label = severity.to_string();
    match severity {
        InsightSeverity::Low => label.blue().to_string(),
        InsightSeverity::Medium => label.yellow().to_string(),
        InsightSeverity::High => label.red().to_string(),
        InsightSeverity::Critical => label.red().bold().to_string(),
    }
}

pub fn color_loss_severity(severity: LossSeverity) -> String {
    let label = severity.to_string();
    match severity {
        LossSeverity::Normal => label.green().to_string(),
        LossSeverity::Warning => label.yellow().to_string(),
        LossSeverity::Critical => label.red().bold().to_string(),
    }
}

pub fn color_confidence_level(level: ConfidenceLevel) -> String {
    let label = level.to_string();
    match level {
        ConfidenceLevel::High => label.green().to_string(),
        ConfidenceLevel::Medium => label.yellow().to_string(),
        ConfidenceLevel::Low => label.red().to_string(),
    }
}

/// Color a 0-100 score where higher is better
pub fn color_score(score: f64) -> String {
    let formatted = format!("{:.0}/100", score);
    if score >= 80.0 {
        formatted.green().to_string()
    } else if score >= 60.0 {
        formatted.yellow().to_string()
    } else {
        formatted.red().to_string()
    }
}

/// Color a 0-100 probability or risk where higher is worse
pub fn color_risk(risk: f64) -> String {
    let formatted = format_percent(risk);
    if risk >= 60.0 {
        formatted.red().to_string()
    } else if risk >= 40.0 {
        formatted.yellow().to_string()
    } else {
        formatted.normal().to_string()
    }
}
