//! Core data models for boiler telemetry analytics

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AnalyticsError, Result};

/// Fuel fired by the boiler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    Coal,
    Gas,
    Oil,
    Biomass,
}

impl FuelType {
    pub const ALL: [FuelType; 4] = [FuelType::Coal, FuelType::Gas, FuelType::Oil, FuelType::Biomass];

    /// Reference cost and combustion figures for this fuel
    pub fn profile(&self) -> FuelProfile {
        match self {
            FuelType::Coal => FuelProfile {
                cost_per_kg: 8.5,
                optimal_efficiency: 86.0,
                calorific_value_kcal_per_kg: 4000.0,
            },
            FuelType::Gas => FuelProfile {
                cost_per_kg: 52.0,
                optimal_efficiency: 90.0,
                calorific_value_kcal_per_kg: 9500.0,
            },
            FuelType::Oil => FuelProfile {
                cost_per_kg: 74.0,
                optimal_efficiency: 89.0,
                calorific_value_kcal_per_kg: 10500.0,
            },
            FuelType::Biomass => FuelProfile {
                cost_per_kg: 3.5,
                optimal_efficiency: 81.0,
                calorific_value_kcal_per_kg: 3200.0,
            },
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FuelType::Coal => write!(f, "Coal"),
            FuelType::Gas => write!(f, "Gas"),
            FuelType::Oil => write!(f, "Oil"),
            FuelType::Biomass => write!(f, "Biomass"),
        }
    }
}

impl FromStr for FuelType {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "coal" => Ok(FuelType::Coal),
            "gas" => Ok(FuelType::Gas),
            "oil" => Ok(FuelType::Oil),
            "biomass" => Ok(FuelType::Biomass),
            _ => Err(AnalyticsError::UnknownFuel(s.to_string())),
        }
    }
}

/// Reference economics for a fuel type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelProfile {
    /// Delivered fuel cost (currency per kg)
    pub cost_per_kg: f64,
    /// Achievable boiler efficiency on this fuel (%)
    pub optimal_efficiency: f64,
    /// Gross calorific value (kcal/kg)
    pub calorific_value_kcal_per_kg: f64,
}

/// A single telemetry packet from the boiler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySample {
    /// Display label, e.g. "14:05:30"
    pub timestamp: String,
    /// Drum steam pressure (bar)
    pub steam_pressure: f64,
    /// Steam flow (tonnes/hr)
    pub steam_flow: f64,
    /// Stack / flue gas temperature (°C)
    pub stack_temp: f64,
    /// Flue gas O₂ (% by volume)
    pub o2_level: f64,
    /// Boiler efficiency (%)
    pub efficiency: f64,
    /// Fuel flow (kg/hr)
    pub fuel_flow: f64,
    pub fuel_type: FuelType,
}

impl TelemetrySample {
    /// Reject packets carrying NaN or infinite readings
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("steamPressure", self.steam_pressure),
            ("steamFlow", self.steam_flow),
            ("stackTemp", self.stack_temp),
            ("o2Level", self.o2_level),
            ("efficiency", self.efficiency),
            ("fuelFlow", self.fuel_flow),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(AnalyticsError::InvalidSample { field, value });
            }
        }
        Ok(())
    }
}

/// Parse telemetry from either a JSON array or newline-delimited JSON objects
pub fn parse_samples(input: &str) -> Result<Vec<TelemetrySample>> {
    let trimmed = input.trim_start();
    if trimmed.starts_with('[') {
        return Ok(serde_json::from_str(trimmed)?);
    }

    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| serde_json::from_str(line).map_err(AnalyticsError::from))
        .collect()
}

/// Direction of a signal over the analysis window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Stable,
    Rising,
    Falling,
    Volatile,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Stable => write!(f, "stable"),
            Trend::Rising => write!(f, "rising"),
            Trend::Falling => write!(f, "falling"),
            Trend::Volatile => write!(f, "volatile"),
        }
    }
}

/// Anomaly risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnomalyType {
    Normal,
    Mild,
    Moderate,
    Severe,
    Critical,
}

impl AnomalyType {
    /// Band an overall risk value; each band includes its lower bound
    pub fn from_risk(risk: f64) -> Self {
        if risk < 25.0 {
            AnomalyType::Normal
        } else if risk < 40.0 {
            AnomalyType::Mild
        } else if risk < 60.0 {
            AnomalyType::Moderate
        } else if risk < 80.0 {
            AnomalyType::Severe
        } else {
            AnomalyType::Critical
        }
    }
}

impl fmt::Display for AnomalyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnomalyType::Normal => write!(f, "normal"),
            AnomalyType::Mild => write!(f, "mild"),
            AnomalyType::Moderate => write!(f, "moderate"),
            AnomalyType::Severe => write!(f, "severe"),
            AnomalyType::Critical => write!(f, "critical"),
        }
    }
}

/// Per-sample anomaly assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyScore {
    pub timestamp: String,
    pub isolation_score: f64,
    pub z_score_deviation: f64,
    pub overall_anomaly_risk: f64,
    pub anomaly_type: AnomalyType,
}

/// Confidence attached to a failure prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "low"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::High => write!(f, "high"),
        }
    }
}

/// Predicted failure of a boiler component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailurePrediction {
    pub component: String,
    /// 0-100
    pub failure_probability: f64,
    pub days_until_failure: u32,
    pub confidence_level: ConfidenceLevel,
    pub indicators: Vec<String>,
}

/// Severity of the current energy loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LossSeverity {
    Normal,
    Warning,
    Critical,
}

impl fmt::Display for LossSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LossSeverity::Normal => write!(f, "normal"),
            LossSeverity::Warning => write!(f, "warning"),
            LossSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Dominant cause of excess energy loss
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossDriver {
    #[serde(rename = "Flue gas heat loss (High stack temp + excess air)")]
    FlueGasHeatLoss,
    #[serde(rename = "Incomplete combustion (Low O₂ causing unburned fuel)")]
    IncompleteCombustion,
    #[serde(rename = "Tube fouling reducing heat transfer")]
    TubeFouling,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl fmt::Display for LossDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            LossDriver::FlueGasHeatLoss => "Flue gas heat loss (High stack temp + excess air)",
            LossDriver::IncompleteCombustion => {
                "Incomplete combustion (Low O₂ causing unburned fuel)"
            }
            LossDriver::TubeFouling => "Tube fouling reducing heat transfer",
            LossDriver::Unknown => "Unknown",
        };
        f.write_str(text)
    }
}

/// Thermal loss compared against the baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyLossAnalysis {
    /// Expected loss at baseline efficiency (%)
    pub normal_energy_loss: f64,
    /// Loss at the latest sample (%)
    pub catastrophic_energy_loss: f64,
    pub loss_driver: LossDriver,
    pub severity: LossSeverity,
    /// Monthly cost recoverable by returning to baseline
    pub recovery_potential: f64,
}

/// Combustion quality classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombustionState {
    Optimal,
    Suboptimal,
    Degrading,
}

impl fmt::Display for CombustionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombustionState::Optimal => write!(f, "optimal"),
            CombustionState::Suboptimal => write!(f, "suboptimal"),
            CombustionState::Degrading => write!(f, "degrading"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthTrends {
    pub pressure: Trend,
    pub temperature: Trend,
    pub efficiency: Trend,
    pub combustion: CombustionState,
}

/// Aggregate boiler health assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoilerHealthScore {
    /// 0-100
    pub overall_score: f64,
    pub trends: HealthTrends,
    pub latent_patterns: Vec<String>,
    pub risk_factors: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Damage,
    Hazard,
    Failure,
    Opportunity,
}

impl InsightCategory {
    /// Display order: hazards first, opportunities last
    pub fn priority(&self) -> u8 {
        match self {
            InsightCategory::Hazard => 0,
            InsightCategory::Damage => 1,
            InsightCategory::Failure => 2,
            InsightCategory::Opportunity => 3,
        }
    }

    pub fn is_risk(&self) -> bool {
        !matches!(self, InsightCategory::Opportunity)
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightCategory::Damage => write!(f, "damage"),
            InsightCategory::Hazard => write!(f, "hazard"),
            InsightCategory::Failure => write!(f, "failure"),
            InsightCategory::Opportunity => write!(f, "opportunity"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl InsightSeverity {
    pub fn priority(&self) -> u8 {
        match self {
            InsightSeverity::Critical => 0,
            InsightSeverity::High => 1,
            InsightSeverity::Medium => 2,
            InsightSeverity::Low => 3,
        }
    }

    /// Contribution to the overall risk score at full confidence
    pub fn weight(&self) -> f64 {
        match self {
            InsightSeverity::Low => 15.0,
            InsightSeverity::Medium => 30.0,
            InsightSeverity::High => 50.0,
            InsightSeverity::Critical => 75.0,
        }
    }
}

impl fmt::Display for InsightSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InsightSeverity::Low => write!(f, "low"),
            InsightSeverity::Medium => write!(f, "medium"),
            InsightSeverity::High => write!(f, "high"),
            InsightSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// A finding from one latent-space rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatentSpaceInsight {
    pub category: InsightCategory,
    pub severity: InsightSeverity,
    pub title: String,
    pub description: String,
    pub evidence: Vec<String>,
    pub action_required: String,
    pub potential_impact: String,
    /// 0-100
    pub confidence: f64,
}

/// Result of one latent-space evaluation pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatentSpaceAnalysis {
    pub insights: Vec<LatentSpaceInsight>,
    pub overall_risk_score: f64,
    pub opportunity_score: f64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}
