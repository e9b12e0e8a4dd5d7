//! Latent-space insight engine
//!
//! Evaluates the rule table in [`rules::RULES`] over rolling-window
//! features, then aggregates the triggered insights into risk and
//! opportunity scores.

pub mod features;
pub mod rules;

pub use features::{WindowFeatures, FEATURE_WINDOW};
pub use rules::{Finding, LatentRule, RULES};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{FuelType, LatentSpaceAnalysis, LatentSpaceInsight, TelemetrySample};

/// Minimum samples before any rule is evaluated
pub const MIN_SAMPLES_FOR_ANALYSIS: usize = 5;

/// Opportunity points per unit of insight confidence
const OPPORTUNITY_WEIGHT: f64 = 0.4;

/// Rule-based latent pattern analysis
#[derive(Debug, Clone)]
pub struct LatentSpaceEngine {
    pub min_samples: usize,
}

impl LatentSpaceEngine {
    pub fn new(min_samples: usize) -> Self {
        Self { min_samples }
    }

    /// Analyze `window`, stamping the result with the current time
    pub fn analyze(&self, window: &[TelemetrySample], fuel: FuelType) -> LatentSpaceAnalysis {
        self.analyze_at(window, fuel, Utc::now())
    }

    /// Analyze `window`, stamping the result with `now`
    pub fn analyze_at(
        &self,
        window: &[TelemetrySample],
        fuel: FuelType,
        now: DateTime<Utc>,
    ) -> LatentSpaceAnalysis {
        let features = match WindowFeatures::extract(window) {
            Some(f) if window.len() >= self.min_samples => f,
            _ => {
                debug!(
                    samples = window.len(),
                    required = self.min_samples,
                    "Insufficient telemetry for latent analysis"
                );
                return LatentSpaceAnalysis {
                    insights: Vec::new(),
                    overall_risk_score: 0.0,
                    opportunity_score: 0.0,
                    timestamp: now,
                };
            }
        };

        let mut insights: Vec<LatentSpaceInsight> = RULES
            .iter()
            .filter_map(|rule| rule.evaluate(&features))
            .collect();

        // sort_by_key is stable, so equal keys keep rule order
        insights.sort_by_key(|i| (i.category.priority(), i.severity.priority()));

        let overall_risk_score = risk_score(&insights);
        let opportunity_score = opportunity_score(&insights);

        debug!(
            fuel = %fuel,
            insights = insights.len(),
            risk = overall_risk_score,
            opportunity = opportunity_score,
            "Latent analysis complete"
        );

        LatentSpaceAnalysis {
            insights,
            overall_risk_score,
            opportunity_score,
            timestamp: now,
        }
    }
}

impl Default for LatentSpaceEngine {
    fn default() -> Self {
        Self {
            min_samples: MIN_SAMPLES_FOR_ANALYSIS,
        }
    }
}

/// Severity-weighted confidence over damage, hazard and failure insights
pub fn risk_score(insights: &[LatentSpaceInsight]) -> f64 {
    insights
        .iter()
        .filter(|i| i.category.is_risk())
        .map(|i| i.severity.weight() * i.confidence / 100.0)
        .sum::<f64>()
        .min(100.0)
}

pub fn opportunity_score(insights: &[LatentSpaceInsight]) -> f64 {
    insights
        .iter()
        .filter(|i| !i.category.is_risk())
        .map(|i| i.confidence * OPPORTUNITY_WEIGHT)
        .sum::<f64>()
        .min(100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InsightCategory, InsightSeverity};

    fn sample(i: usize, o2: f64) -> TelemetrySample {
        TelemetrySample {
            timestamp: format!("t{i}"),
            steam_pressure: 62.0,
            steam_flow: 46.0,
            stack_temp: 165.0,
            o2_level: o2,
            efficiency: 86.0,
            fuel_flow: 5000.0,
            fuel_type: FuelType::Gas,
        }
    }

    fn fixed_time() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-03-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn test_short_window_is_empty() {
        let engine = LatentSpaceEngine::default();
        let window: Vec<_> = (0..4).map(|i| sample(i, 4.5)).collect();
        let result = engine.analyze_at(&window, FuelType::Gas, fixed_time());
        assert!(result.insights.is_empty());
        assert_eq!(result.overall_risk_score, 0.0);
        assert_eq!(result.opportunity_score, 0.0);
        assert_eq!(result.timestamp, fixed_time());

        assert!(engine.analyze(&[], FuelType::Gas).insights.is_empty());
    }

    #[test]
    fn test_excess_air_scoring() {
        let window: Vec<_> = (0..10).map(|i| sample(i, 4.5)).collect();
        let result = LatentSpaceEngine::default().analyze_at(&window, FuelType::Gas, fixed_time());

        assert_eq!(result.insights.len(), 1);
        assert_eq!(result.insights[0].title, "Excess Air Reduction Opportunity");
        assert_eq!(result.overall_risk_score, 0.0);
        assert!((result.opportunity_score - 34.0).abs() < 1e-9);
    }

    #[test]
    fn test_risk_score_capped() {
        let insight = |severity| LatentSpaceInsight {
            category: InsightCategory::Hazard,
            severity,
            title: String::new(),
            description: String::new(),
            evidence: Vec::new(),
            action_required: String::new(),
            potential_impact: String::new(),
            confidence: 90.0,
        };
        let insights = vec![
            insight(InsightSeverity::Critical),
            insight(InsightSeverity::Critical),
        ];
        assert_eq!(risk_score(&insights), 100.0);
        assert_eq!(opportunity_score(&insights), 0.0);
    }

    #[test]
    fn test_insights_ranked_hazard_first() {
        // Unstable lean O₂ at high pressure: hazard, failure and opportunity rules all fire
        let window: Vec<_> = (0..10)
            .map(|i| {
                let mut s = sample(i, if i % 2 == 0 { 1.5 } else { 4.0 });
                s.steam_pressure = if i % 2 == 0 { 66.0 } else { 62.0 };
                s
            })
            .collect();
        let result = LatentSpaceEngine::default().analyze_at(&window, FuelType::Coal, fixed_time());

        let categories: Vec<_> = result.insights.iter().map(|i| i.category).collect();
        assert_eq!(categories.first(), Some(&InsightCategory::Hazard));
        assert!(categories.windows(2).all(|w| w[0].priority() <= w[1].priority()));
        assert!(result.overall_risk_score > 0.0);
    }
}
