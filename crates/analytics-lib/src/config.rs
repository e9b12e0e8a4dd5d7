//! Operating assumptions for the analytics engine
//!
//! Reference target bands and cost constants for a generic boiler class.
//! Defaults describe a 50 MW sub-critical unit; other classes override them
//! from a file or environment.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::models::FuelType;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "BOILER";

/// Default number of samples the host keeps in its rolling window
pub const DEFAULT_BUFFER_CAPACITY: usize = 20;

/// Target operating bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetBands {
    /// Drum pressure setpoint (bar)
    pub pressure_setpoint_bar: f64,
    /// Stack temperature above which superheater stress accrues (°C)
    pub superheater_stack_temp_c: f64,
    /// Reference efficiency for health and energy-loss scoring (%)
    pub baseline_efficiency_pct: f64,
    /// O₂ below this is starved combustion (%)
    pub o2_low_pct: f64,
    /// O₂ above this is gross excess air (%)
    pub o2_high_pct: f64,
    pub o2_optimal_low_pct: f64,
    pub o2_optimal_high_pct: f64,
}

impl Default for TargetBands {
    fn default() -> Self {
        Self {
            pressure_setpoint_bar: 65.0,
            superheater_stack_temp_c: 170.0,
            baseline_efficiency_pct: 85.0,
            o2_low_pct: 2.5,
            o2_high_pct: 5.0,
            o2_optimal_low_pct: 3.0,
            o2_optimal_high_pct: 4.5,
        }
    }
}

/// Assumptions used to put a price on lost efficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostModel {
    /// Nominal thermal capacity (MW), not derived from the unit's nameplate
    pub capacity_mw: f64,
    pub operating_hours_per_month: f64,
    pub fuel_cost_per_mwh: f64,
    pub currency: String,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            capacity_mw: 50.0,
            operating_hours_per_month: 720.0,
            fuel_cost_per_mwh: 3000.0,
            currency: "INR".to_string(),
        }
    }
}

impl CostModel {
    /// Monthly cost of `loss_pct` percentage points of extra loss
    pub fn monthly_cost(&self, loss_pct: f64) -> f64 {
        let wasted_mwh = (loss_pct / 100.0) * self.capacity_mw * self.operating_hours_per_month;
        wasted_mwh * self.fuel_cost_per_mwh
    }
}

/// Rolling window behaviour on the host side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub buffer_capacity: usize,
    /// Start a fresh history when the fuel type of incoming samples changes
    pub reset_on_fuel_change: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            reset_on_fuel_change: true,
        }
    }
}

/// Complete analytics configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub targets: TargetBands,
    pub costs: CostModel,
    pub window: WindowConfig,
    /// Use the fuel's optimal efficiency as the energy-loss baseline
    pub use_fuel_baseline: bool,
}

impl AnalyticsConfig {
    /// Load configuration from defaults, an optional file, and the environment
    ///
    /// Environment overrides use `BOILER__<SECTION>__<KEY>`, for example
    /// `BOILER__COSTS__CAPACITY_MW=75`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Energy-loss baseline for a given fuel
    pub fn baseline_efficiency(&self, fuel: FuelType) -> f64 {
        if self.use_fuel_baseline {
            fuel.profile().optimal_efficiency
        } else {
            self.targets.baseline_efficiency_pct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_reference_boiler() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.targets.pressure_setpoint_bar, 65.0);
        assert_eq!(config.targets.superheater_stack_temp_c, 170.0);
        assert_eq!(config.targets.baseline_efficiency_pct, 85.0);
        assert_eq!(config.costs.capacity_mw, 50.0);
        assert_eq!(config.costs.fuel_cost_per_mwh, 3000.0);
        assert_eq!(config.window.buffer_capacity, 20);
    }

    #[test]
    fn test_monthly_cost() {
        let costs = CostModel::default();
        // 1 point of loss: 0.01 * 50 MW * 720 h * 3000
        assert!((costs.monthly_cost(1.0) - 1_080_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_fuel_baseline_switch() {
        let mut config = AnalyticsConfig::default();
        assert_eq!(config.baseline_efficiency(FuelType::Gas), 85.0);
        config.use_fuel_baseline = true;
        assert_eq!(config.baseline_efficiency(FuelType::Gas), 90.0);
        assert_eq!(config.baseline_efficiency(FuelType::Biomass), 81.0);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[costs]\ncapacity_mw = 75.0\n\n[targets]\npressure_setpoint_bar = 42.0").unwrap();

        let config = AnalyticsConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.costs.capacity_mw, 75.0);
        assert_eq!(config.costs.fuel_cost_per_mwh, 3000.0);
        assert_eq!(config.targets.pressure_setpoint_bar, 42.0);
        assert_eq!(config.targets.baseline_efficiency_pct, 85.0);
        assert!(config.window.reset_on_fuel_change);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = AnalyticsConfig::load(Some(Path::new("/nonexistent/boiler.toml")));
        assert!(result.is_err());
    }
}
