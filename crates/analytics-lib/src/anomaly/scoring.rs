//! Per-sample anomaly scores
//!
//! Both scores measure how far a sample sits from the reference population
//! in units of its standard deviation. They are heuristics: the isolation
//! score is not a true isolation forest, and both are scaled onto 0-100 with
//! fixed factors that the risk bands depend on.

use crate::models::TelemetrySample;
use crate::stats::{Signal, Stats};

/// Added to the standard deviation so a flat signal does not divide by zero
const STD_DEV_EPSILON: f64 = 0.001;

/// Deviations at or below this many sigma contribute nothing to isolation depth
const ISOLATION_SIGMA_CUTOFF: f64 = 2.0;

/// Depth accumulated per sigma of deviation beyond the cutoff
const ISOLATION_DEPTH_WEIGHT: f64 = 0.15;

/// Scale from efficiency z-score to the 0-100 range
const Z_SCORE_SCALE: f64 = 25.0;

const MAX_SCORE: f64 = 100.0;

/// Features considered by the isolation score
pub const ISOLATION_FEATURES: [Signal; 5] = [
    Signal::SteamPressure,
    Signal::StackTemp,
    Signal::O2Level,
    Signal::SteamFlow,
    Signal::Efficiency,
];

fn sigma_distance(value: f64, reference: &Stats) -> f64 {
    ((value - reference.mean) / (reference.std_dev + STD_DEV_EPSILON)).abs()
}

/// Multivariate isolation depth of `point` against `history`, 0-100
pub fn isolation_score(point: &TelemetrySample, history: &[TelemetrySample]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let depth: f64 = ISOLATION_FEATURES
        .iter()
        .map(|signal| {
            let reference = Stats::from_values(&signal.series(history));
            sigma_distance(signal.read(point), &reference)
        })
        .filter(|deviation| *deviation > ISOLATION_SIGMA_CUTOFF)
        .map(|deviation| deviation * ISOLATION_DEPTH_WEIGHT)
        .sum();

    depth.min(MAX_SCORE)
}

/// Efficiency z-score of `point` against `history`, scaled to 0-100
pub fn z_score_deviation(point: &TelemetrySample, history: &[TelemetrySample]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }

    let reference = Stats::from_values(&Signal::Efficiency.series(history));
    (sigma_distance(point.efficiency, &reference) * Z_SCORE_SCALE).min(MAX_SCORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FuelType;

    fn sample(pressure: f64, efficiency: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp: "t".to_string(),
            steam_pressure: pressure,
            steam_flow: 45.0,
            stack_temp: 165.0,
            o2_level: 3.5,
            efficiency,
            fuel_flow: 5000.0,
            fuel_type: FuelType::Coal,
        }
    }

    #[test]
    fn test_in_band_sample_scores_zero_isolation() {
        let history: Vec<_> = (0..10).map(|i| sample(64.0 + (i % 3) as f64, 85.0)).collect();
        assert_eq!(isolation_score(&history[4], &history), 0.0);
    }

    #[test]
    fn test_outlier_accumulates_depth() {
        // pressure alternates 64/66: mean 65, std 1
        let mut history: Vec<_> = (0..10)
            .map(|i| sample(if i % 2 == 0 { 64.0 } else { 66.0 }, 85.0))
            .collect();
        let outlier = sample(70.0, 85.0);
        let score = isolation_score(&outlier, &history);
        // 5 sigma (slightly less for epsilon) * 0.15
        assert!((score - 5.0 / 1.001 * 0.15).abs() < 1e-9);

        history.push(outlier);
        assert!(isolation_score(&history[10], &history) > 0.0);
    }

    #[test]
    fn test_z_score_flat_history() {
        let history: Vec<_> = (0..5).map(|_| sample(65.0, 85.0)).collect();
        assert_eq!(z_score_deviation(&history[0], &history), 0.0);

        // 1 point off a flat signal is ~1000 sigma, clamped
        let off = sample(65.0, 86.0);
        assert_eq!(z_score_deviation(&off, &history), 100.0);
    }

    #[test]
    fn test_empty_history() {
        let point = sample(65.0, 85.0);
        assert_eq!(isolation_score(&point, &[]), 0.0);
        assert_eq!(z_score_deviation(&point, &[]), 0.0);
    }
}
