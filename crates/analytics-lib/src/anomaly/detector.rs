//! Window-level anomaly detection
//!
//! Scores each of the trailing samples against the full window passed in,
//! so the reference population is always the caller's whole snapshot.

use tracing::debug;

use super::scoring::{isolation_score, z_score_deviation};
use crate::models::{AnomalyScore, AnomalyType, TelemetrySample};
use crate::stats::tail;

/// Minimum samples required for anomaly detection
pub const MIN_SAMPLES_FOR_DETECTION: usize = 5;

/// Number of trailing samples that receive a score
pub const MAX_SCORED_SAMPLES: usize = 20;

/// Scores trailing telemetry samples for anomalies
#[derive(Debug, Clone)]
pub struct AnomalyDetector {
    /// Minimum window length before any sample is scored
    pub min_samples: usize,
    /// How many of the most recent samples to score
    pub max_scored: usize,
}

impl AnomalyDetector {
    pub fn new(min_samples: usize, max_scored: usize) -> Self {
        Self {
            min_samples,
            max_scored,
        }
    }

    /// Score the trailing samples of `window`
    ///
    /// Returns an empty list when the window is shorter than `min_samples`.
    pub fn detect(&self, window: &[TelemetrySample]) -> Vec<AnomalyScore> {
        if window.len() < self.min_samples {
            debug!(
                samples = window.len(),
                required = self.min_samples,
                "Insufficient telemetry for anomaly detection"
            );
            return Vec::new();
        }

        tail(window, self.max_scored)
            .iter()
            .map(|point| {
                let isolation = isolation_score(point, window);
                let z_score = z_score_deviation(point, window);
                let overall = (isolation + z_score) / 2.0;

                AnomalyScore {
                    timestamp: point.timestamp.clone(),
                    isolation_score: isolation,
                    z_score_deviation: z_score,
                    overall_anomaly_risk: overall,
                    anomaly_type: AnomalyType::from_risk(overall),
                }
            })
            .collect()
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self {
            min_samples: MIN_SAMPLES_FOR_DETECTION,
            max_scored: MAX_SCORED_SAMPLES,
        }
    }
}
