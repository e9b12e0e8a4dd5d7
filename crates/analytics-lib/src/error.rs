//! Error types for the analytics library
//!
//! The analyzers themselves never fail; these errors cover the edges where
//! telemetry and configuration enter the crate.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyticsError>;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("invalid telemetry sample: {field} is {value}")]
    InvalidSample { field: &'static str, value: f64 },

    #[error("unknown fuel type: {0}")]
    UnknownFuel(String),

    #[error("failed to parse telemetry: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}
