//! Anomaly detection over boiler telemetry
//!
//! This module provides:
//! - Isolation-depth scoring (multivariate, hard 2σ cutoff per feature)
//! - Efficiency z-score deviation
//! - Per-sample risk banding across the trailing window

mod detector;
mod scoring;

pub use detector::{AnomalyDetector, MAX_SCORED_SAMPLES, MIN_SAMPLES_FOR_DETECTION};
pub use scoring::{isolation_score, z_score_deviation, ISOLATION_FEATURES};
