//! Boiler health scoring
//!
//! Deducts penalties from a 100-point baseline for the latest sample's
//! deviation from target bands, then annotates trends, latent patterns and
//! risk factors seen across the recent window.

use tracing::debug;

use crate::config::TargetBands;
use crate::models::{BoilerHealthScore, CombustionState, HealthTrends, TelemetrySample, Trend};
use crate::stats::{tail, trend, Signal};

/// Score reported when there is too little history to assess
pub const DEFAULT_HEALTH_SCORE: f64 = 75.0;

/// Samples used for trend and pattern analysis
const TREND_WINDOW: usize = 10;

/// Stack temperature penalty steps (°C, points), checked highest first
const STACK_TEMP_PENALTIES: [(f64, f64); 3] = [(185.0, 20.0), (180.0, 10.0), (175.0, 3.0)];

/// Points deducted per percentage point of efficiency below baseline
const EFFICIENCY_PENALTY_PER_POINT: f64 = 2.0;

/// Efficiency below which tube cleaning is recommended (%)
const CLEANING_EFFICIENCY_PCT: f64 = 82.0;

/// Scores overall boiler condition
#[derive(Debug, Clone, Default)]
pub struct HealthScorer {
    targets: TargetBands,
}

impl HealthScorer {
    pub fn new(targets: TargetBands) -> Self {
        Self { targets }
    }

    /// Score the window; fewer than two samples yields the neutral default
    pub fn score(&self, window: &[TelemetrySample]) -> BoilerHealthScore {
        if window.len() < 2 {
            debug!(samples = window.len(), "Insufficient telemetry for health scoring");
            return BoilerHealthScore::neutral();
        }

        let latest = &window[window.len() - 1];
        let recent = tail(window, TREND_WINDOW);
        let pressure_trend = trend(&Signal::SteamPressure.series(recent));
        let temp_trend = trend(&Signal::StackTemp.series(recent));
        let efficiency_trend = trend(&Signal::Efficiency.series(recent));
        let o2_trend = trend(&Signal::O2Level.series(recent));

        let score = 100.0 - self.penalties(latest);

        let mut latent_patterns = Vec::new();
        let mut risk_factors = Vec::new();

        if temp_trend == Trend::Rising {
            latent_patterns.push("Progressive fouling detected in economizer".to_string());
            risk_factors.push("Soot layer buildup reducing heat transfer efficiency".to_string());
        }

        let starved = recent.iter().any(|s| s.o2_level < self.targets.o2_low_pct);
        let inefficient = recent.iter().any(|s| s.efficiency < 80.0);
        if starved && inefficient {
            latent_patterns.push("Combustion instability with incomplete fuel burn".to_string());
            risk_factors.push("Unburned carbon loss exceeding 3%".to_string());
        }

        let pressure_offset = (latest.steam_pressure - self.targets.pressure_setpoint_bar).abs();
        if pressure_offset > 3.0 && pressure_trend == Trend::Volatile {
            latent_patterns.push("Drum level control system oscillation".to_string());
            risk_factors.push("Feedwater control valve hunt cycle detected".to_string());
        }

        if latest.efficiency < CLEANING_EFFICIENCY_PCT {
            risk_factors.push("Heat rate degrading: schedule tube cleaning".to_string());
        }

        BoilerHealthScore {
            overall_score: score.clamp(0.0, 100.0),
            trends: HealthTrends {
                pressure: pressure_trend,
                temperature: temp_trend,
                efficiency: efficiency_trend,
                combustion: self.combustion_state(latest, o2_trend),
            },
            latent_patterns,
            risk_factors,
        }
    }

    /// Total penalty points for the latest sample
    fn penalties(&self, latest: &TelemetrySample) -> f64 {
        let targets = &self.targets;

        let pressure_offset = (latest.steam_pressure - targets.pressure_setpoint_bar).abs();
        let pressure = if pressure_offset > 5.0 {
            15.0
        } else if pressure_offset > 2.0 {
            5.0
        } else {
            0.0
        };

        let stack_temp = STACK_TEMP_PENALTIES
            .iter()
            .find(|(limit, _)| latest.stack_temp > *limit)
            .map(|(_, points)| *points)
            .unwrap_or(0.0);

        let efficiency = ((targets.baseline_efficiency_pct - latest.efficiency)
            * EFFICIENCY_PENALTY_PER_POINT)
            .max(0.0);

        let o2 = latest.o2_level;
        let o2_penalty = if o2 < targets.o2_low_pct || o2 > targets.o2_high_pct {
            10.0
        } else if o2 < targets.o2_optimal_low_pct || o2 > targets.o2_optimal_high_pct {
            5.0
        } else {
            0.0
        };

        pressure + stack_temp + efficiency + o2_penalty
    }

    fn combustion_state(&self, latest: &TelemetrySample, o2_trend: Trend) -> CombustionState {
        let targets = &self.targets;
        let o2 = latest.o2_level;

        if o2_trend == Trend::Volatile || o2 < targets.o2_low_pct || o2 > targets.o2_high_pct {
            CombustionState::Degrading
        } else if latest.efficiency > targets.baseline_efficiency_pct
            && o2 > targets.o2_optimal_low_pct
            && o2 < targets.o2_optimal_high_pct
        {
            CombustionState::Optimal
        } else {
            CombustionState::Suboptimal
        }
    }
}

impl BoilerHealthScore {
    /// Mid-range score with stable trends, used when history is too short
    pub fn neutral() -> Self {
        Self {
            overall_score: DEFAULT_HEALTH_SCORE,
            trends: HealthTrends {
                pressure: Trend::Stable,
                temperature: Trend::Stable,
                efficiency: Trend::Stable,
                combustion: CombustionState::Optimal,
            },
            latent_patterns: Vec::new(),
            risk_factors: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FuelType;

    fn sample(pressure: f64, stack_temp: f64, o2: f64, efficiency: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp: "t".to_string(),
            steam_pressure: pressure,
            steam_flow: 45.0,
            stack_temp,
            o2_level: o2,
            efficiency,
            fuel_flow: 5000.0,
            fuel_type: FuelType::Oil,
        }
    }

    #[test]
    fn test_short_window_is_neutral() {
        let scorer = HealthScorer::default();
        assert_eq!(scorer.score(&[]), BoilerHealthScore::neutral());
        assert_eq!(
            scorer.score(&[sample(90.0, 250.0, 1.0, 50.0)]),
            BoilerHealthScore::neutral()
        );
    }

    #[test]
    fn test_on_target_scores_full() {
        let window: Vec<_> = (0..5).map(|_| sample(65.0, 165.0, 3.5, 86.0)).collect();
        let health = HealthScorer::default().score(&window);
        assert_eq!(health.overall_score, 100.0);
        assert_eq!(health.trends.combustion, CombustionState::Optimal);
        assert_eq!(health.trends.pressure, Trend::Stable);
        assert!(health.latent_patterns.is_empty());
        assert!(health.risk_factors.is_empty());
    }

    #[test]
    fn test_penalties_accumulate() {
        // pressure +3 (5), stack 182 (10), efficiency 84 (2), O₂ 4.7 (5)
        let window = vec![sample(65.0, 165.0, 3.5, 86.0), sample(68.0, 182.0, 4.7, 84.0)];
        let health = HealthScorer::default().score(&window);
        assert!((health.overall_score - 78.0).abs() < 1e-9);
        assert_eq!(health.trends.combustion, CombustionState::Suboptimal);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let window = vec![sample(65.0, 165.0, 3.5, 86.0), sample(90.0, 220.0, 1.0, 30.0)];
        let health = HealthScorer::default().score(&window);
        assert_eq!(health.overall_score, 0.0);
        assert_eq!(health.trends.combustion, CombustionState::Degrading);
    }

    #[test]
    fn test_rising_stack_temp_flags_fouling() {
        let window: Vec<_> = (0..10)
            .map(|i| sample(65.0, 160.0 + i as f64, 3.5, 86.0))
            .collect();
        let health = HealthScorer::default().score(&window);
        assert_eq!(health.trends.temperature, Trend::Rising);
        assert!(health
            .latent_patterns
            .contains(&"Progressive fouling detected in economizer".to_string()));
    }

    #[test]
    fn test_incomplete_combustion_pattern() {
        let mut window: Vec<_> = (0..4).map(|_| sample(65.0, 165.0, 3.5, 86.0)).collect();
        window.push(sample(65.0, 165.0, 2.0, 84.0));
        window.push(sample(65.0, 165.0, 3.4, 79.0));
        let health = HealthScorer::default().score(&window);
        assert!(health
            .latent_patterns
            .contains(&"Combustion instability with incomplete fuel burn".to_string()));
        assert!(health
            .risk_factors
            .contains(&"Heat rate degrading: schedule tube cleaning".to_string()));
    }

    #[test]
    fn test_drum_oscillation_pattern() {
        let pressures = [65.0, 61.0, 66.0, 60.0, 67.0, 61.0];
        let window: Vec<_> = pressures
            .iter()
            .map(|p| sample(*p, 165.0, 3.5, 86.0))
            .collect();
        let health = HealthScorer::default().score(&window);
        assert_eq!(health.trends.pressure, Trend::Volatile);
        assert!(health
            .latent_patterns
            .contains(&"Drum level control system oscillation".to_string()));
    }
}
