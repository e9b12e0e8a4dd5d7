//! Structured logging for analytics outcomes
//!
//! Every event carries an `event` field and the boiler id so log pipelines
//! can filter on either.

use tracing::{info, warn};

use crate::analyzer::BoilerReport;
use crate::models::{
    AnomalyScore, AnomalyType, BoilerHealthScore, EnergyLossAnalysis, FailurePrediction,
    FuelType, InsightSeverity, LatentSpaceInsight, LossSeverity,
};

/// Structured logger for analytics events
#[derive(Debug, Clone)]
pub struct StructuredLogger {
    boiler_id: String,
}

impl StructuredLogger {
    pub fn new(boiler_id: impl Into<String>) -> Self {
        Self {
            boiler_id: boiler_id.into(),
        }
    }

    pub fn boiler_id(&self) -> &str {
        &self.boiler_id
    }

    /// Log monitor startup
    pub fn log_startup(&self, version: &str, input: &str) {
        info!(
            event = "monitor_started",
            boiler = %self.boiler_id,
            version = %version,
            input = %input,
            "Boiler monitor started"
        );
    }

    /// Log monitor shutdown
    pub fn log_shutdown(&self, reason: &str, samples_processed: u64) {
        info!(
            event = "monitor_shutdown",
            boiler = %self.boiler_id,
            reason = %reason,
            samples_processed = samples_processed,
            "Boiler monitor shutting down"
        );
    }

    /// Log an anomaly score; severe and critical bands log at warn
    pub fn log_anomaly(&self, anomaly: &AnomalyScore) {
        if anomaly.anomaly_type >= AnomalyType::Severe {
            warn!(
                event = "anomaly_detected",
                boiler = %self.boiler_id,
                sample = %anomaly.timestamp,
                anomaly_type = %anomaly.anomaly_type,
                risk = anomaly.overall_anomaly_risk,
                isolation_score = anomaly.isolation_score,
                z_score = anomaly.z_score_deviation,
                "Telemetry anomaly detected"
            );
        } else {
            info!(
                event = "anomaly_detected",
                boiler = %self.boiler_id,
                sample = %anomaly.timestamp,
                anomaly_type = %anomaly.anomaly_type,
                risk = anomaly.overall_anomaly_risk,
                "Telemetry anomaly scored"
            );
        }
    }

    pub fn log_failure_prediction(&self, prediction: &FailurePrediction) {
        info!(
            event = "failure_predicted",
            boiler = %self.boiler_id,
            component = %prediction.component,
            probability = prediction.failure_probability,
            days_until_failure = prediction.days_until_failure,
            confidence = %prediction.confidence_level,
            "Component failure predicted"
        );
    }

    pub fn log_energy_loss(&self, loss: &EnergyLossAnalysis, currency: &str) {
        if loss.severity == LossSeverity::Normal {
            info!(
                event = "energy_loss",
                boiler = %self.boiler_id,
                severity = %loss.severity,
                current_loss_pct = loss.catastrophic_energy_loss,
                "Energy loss within normal range"
            );
        } else {
            warn!(
                event = "energy_loss",
                boiler = %self.boiler_id,
                severity = %loss.severity,
                driver = %loss.loss_driver,
                normal_loss_pct = loss.normal_energy_loss,
                current_loss_pct = loss.catastrophic_energy_loss,
                recovery_potential = loss.recovery_potential,
                currency = %currency,
                "Excess energy loss detected"
            );
        }
    }

    pub fn log_health(&self, health: &BoilerHealthScore) {
        info!(
            event = "health_scored",
            boiler = %self.boiler_id,
            score = health.overall_score,
            pressure_trend = %health.trends.pressure,
            temperature_trend = %health.trends.temperature,
            efficiency_trend = %health.trends.efficiency,
            combustion = %health.trends.combustion,
            risk_factors = health.risk_factors.len(),
            "Boiler health scored"
        );
    }

    pub fn log_insight(&self, insight: &LatentSpaceInsight) {
        if insight.severity == InsightSeverity::Critical {
            warn!(
                event = "latent_insight",
                boiler = %self.boiler_id,
                category = %insight.category,
                severity = %insight.severity,
                title = %insight.title,
                confidence = insight.confidence,
                action = %insight.action_required,
                "Critical latent insight"
            );
        } else {
            info!(
                event = "latent_insight",
                boiler = %self.boiler_id,
                category = %insight.category,
                severity = %insight.severity,
                title = %insight.title,
                confidence = insight.confidence,
                "Latent insight"
            );
        }
    }

    pub fn log_fuel_switch(&self, from: FuelType, to: FuelType) {
        info!(
            event = "fuel_switched",
            boiler = %self.boiler_id,
            from = %from,
            to = %to,
            "Fuel changed, telemetry window reset"
        );
    }

    pub fn log_sample_rejected(&self, line: u64, reason: &str) {
        warn!(
            event = "sample_rejected",
            boiler = %self.boiler_id,
            line = line,
            reason = %reason,
            "Telemetry sample rejected"
        );
    }

    /// Log the parts of a report worth reporting on every cycle
    ///
    /// Anomalies are limited to the newest sample so a rolling window does
    /// not re-log the same history each cycle.
    pub fn log_report(&self, report: &BoilerReport, currency: &str) {
        if let Some(latest) = report.anomalies.last() {
            if latest.anomaly_type >= AnomalyType::Severe {
                self.log_anomaly(latest);
            }
        }

        for prediction in &report.failure_predictions {
            self.log_failure_prediction(prediction);
        }
        self.log_energy_loss(&report.energy_loss, currency);
        self.log_health(&report.health_score);
        for insight in &report.latent_analysis.insights {
            self.log_insight(insight);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_logger_creation() {
        let logger = StructuredLogger::new("boiler-7");
        assert_eq!(logger.boiler_id(), "boiler-7");
    }

    #[test]
    fn test_log_report_without_subscriber() {
        let logger = StructuredLogger::new("boiler-7");
        let report = crate::BoilerAnalyzer::default().analyze(&[], FuelType::Coal);
        logger.log_report(&report, "INR");
    }
}
