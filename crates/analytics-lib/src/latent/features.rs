//! Rolling-window features for latent-space rules
//!
//! Statistics and rates of change over the trailing samples, computed once
//! per analysis and shared by every rule.

use crate::models::TelemetrySample;
use crate::stats::{rate_of_change, tail, Signal, Stats};

/// Number of trailing samples the rules look at
pub const FEATURE_WINDOW: usize = 10;

/// Derived features for one analysis pass
#[derive(Debug, Clone)]
pub struct WindowFeatures {
    pub latest: TelemetrySample,
    pub pressure: Stats,
    pub stack_temp: Stats,
    pub o2: Stats,
    pub efficiency: Stats,
    pub steam_flow: Stats,
    pub pressure_roc: f64,
    pub stack_temp_roc: f64,
    pub efficiency_roc: f64,
    pub o2_roc: f64,
    pub steam_flow_roc: f64,
    pub fuel_flow_roc: f64,
}

impl WindowFeatures {
    /// Extract features from the trailing [`FEATURE_WINDOW`] samples
    ///
    /// Returns `None` for an empty window.
    pub fn extract(window: &[TelemetrySample]) -> Option<Self> {
        let latest = window.last()?.clone();
        let recent = tail(window, FEATURE_WINDOW);

        let series = |signal: Signal| signal.series(recent);
        let pressure = series(Signal::SteamPressure);
        let stack_temp = series(Signal::StackTemp);
        let o2 = series(Signal::O2Level);
        let efficiency = series(Signal::Efficiency);
        let steam_flow = series(Signal::SteamFlow);
        let fuel_flow = series(Signal::FuelFlow);

        Some(Self {
            latest,
            pressure: Stats::from_values(&pressure),
            stack_temp: Stats::from_values(&stack_temp),
            o2: Stats::from_values(&o2),
            efficiency: Stats::from_values(&efficiency),
            steam_flow: Stats::from_values(&steam_flow),
            pressure_roc: rate_of_change(&pressure),
            stack_temp_roc: rate_of_change(&stack_temp),
            efficiency_roc: rate_of_change(&efficiency),
            o2_roc: rate_of_change(&o2),
            steam_flow_roc: rate_of_change(&steam_flow),
            fuel_flow_roc: rate_of_change(&fuel_flow),
        })
    }
}
