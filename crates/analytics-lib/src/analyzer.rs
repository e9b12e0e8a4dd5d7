//! Combined analysis over one telemetry snapshot

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::anomaly::AnomalyDetector;
use crate::config::AnalyticsConfig;
use crate::energy::EnergyLossAnalyzer;
use crate::health::HealthScorer;
use crate::latent::LatentSpaceEngine;
use crate::models::{
    AnomalyScore, BoilerHealthScore, EnergyLossAnalysis, FailurePrediction, FuelType,
    LatentSpaceAnalysis, TelemetrySample,
};
use crate::predictor::FailurePredictor;

/// Output of every analyzer for the same window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoilerReport {
    pub anomalies: Vec<AnomalyScore>,
    pub failure_predictions: Vec<FailurePrediction>,
    pub energy_loss: EnergyLossAnalysis,
    pub health_score: BoilerHealthScore,
    pub latent_analysis: LatentSpaceAnalysis,
    pub samples_analyzed: usize,
    pub fuel_type: FuelType,
}

/// Runs each analyzer with a shared configuration
#[derive(Debug, Clone)]
pub struct BoilerAnalyzer {
    config: AnalyticsConfig,
    anomaly_detector: AnomalyDetector,
    failure_predictor: FailurePredictor,
    energy_analyzer: EnergyLossAnalyzer,
    health_scorer: HealthScorer,
    latent_engine: LatentSpaceEngine,
}

impl BoilerAnalyzer {
    pub fn new(config: AnalyticsConfig) -> Self {
        Self {
            anomaly_detector: AnomalyDetector::default(),
            failure_predictor: FailurePredictor::new(config.targets.clone()),
            energy_analyzer: EnergyLossAnalyzer::new(config.costs.clone(), config.targets.clone()),
            health_scorer: HealthScorer::new(config.targets.clone()),
            latent_engine: LatentSpaceEngine::default(),
            config,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    pub fn detect_anomalies(&self, window: &[TelemetrySample]) -> Vec<AnomalyScore> {
        self.anomaly_detector.detect(window)
    }

    pub fn predict_failures<R: Rng + ?Sized>(
        &self,
        window: &[TelemetrySample],
        fuel: FuelType,
        rng: &mut R,
    ) -> Vec<FailurePrediction> {
        self.failure_predictor.predict(window, fuel, rng)
    }

    /// Energy loss against the configured baseline for `fuel`
    pub fn energy_loss(&self, window: &[TelemetrySample], fuel: FuelType) -> EnergyLossAnalysis {
        self.energy_analyzer
            .analyze(window, self.config.baseline_efficiency(fuel))
    }

    /// Energy loss against an explicit baseline efficiency (%)
    pub fn energy_loss_with_baseline(
        &self,
        window: &[TelemetrySample],
        baseline_efficiency: f64,
    ) -> EnergyLossAnalysis {
        self.energy_analyzer.analyze(window, baseline_efficiency)
    }

    pub fn health(&self, window: &[TelemetrySample]) -> BoilerHealthScore {
        self.health_scorer.score(window)
    }

    pub fn latent_insights(
        &self,
        window: &[TelemetrySample],
        fuel: FuelType,
        now: DateTime<Utc>,
    ) -> LatentSpaceAnalysis {
        self.latent_engine.analyze_at(window, fuel, now)
    }

    /// Run every analyzer over `window`
    ///
    /// `rng` only feeds the economizer failure rule; `now` stamps the latent
    /// analysis. Everything else is a pure function of the window.
    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        window: &[TelemetrySample],
        fuel: FuelType,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> BoilerReport {
        BoilerReport {
            anomalies: self.detect_anomalies(window),
            failure_predictions: self.predict_failures(window, fuel, rng),
            energy_loss: self.energy_loss(window, fuel),
            health_score: self.health(window),
            latent_analysis: self.latent_insights(window, fuel, now),
            samples_analyzed: window.len(),
            fuel_type: fuel,
        }
    }

    /// Run every analyzer with the thread-local generator and wall clock
    pub fn analyze(&self, window: &[TelemetrySample], fuel: FuelType) -> BoilerReport {
        self.analyze_with_rng(window, fuel, &mut rand::thread_rng(), Utc::now())
    }
}

impl Default for BoilerAnalyzer {
    fn default() -> Self {
        Self::new(AnalyticsConfig::default())
    }
}
