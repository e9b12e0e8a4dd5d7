//! Telemetry analytics for industrial boilers
//!
//! This crate provides:
//! - Statistical anomaly scoring
//! - Rule-based component failure prediction
//! - Energy loss attribution and costing
//! - Aggregate health scoring
//! - Latent-space insight rules
//! - A bounded rolling telemetry window for hosts

pub mod analyzer;
pub mod anomaly;
pub mod buffer;
pub mod config;
pub mod energy;
pub mod error;
pub mod health;
pub mod latent;
pub mod models;
pub mod observability;
pub mod predictor;
pub mod stats;

pub use analyzer::{BoilerAnalyzer, BoilerReport};
pub use anomaly::AnomalyDetector;
pub use buffer::TelemetryBuffer;
pub use config::{AnalyticsConfig, CostModel, TargetBands, WindowConfig};
pub use energy::EnergyLossAnalyzer;
pub use error::{AnalyticsError, Result};
pub use health::HealthScorer;
pub use latent::LatentSpaceEngine;
pub use models::*;
pub use observability::StructuredLogger;
pub use predictor::FailurePredictor;
