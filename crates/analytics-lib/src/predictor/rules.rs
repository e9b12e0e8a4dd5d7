//! Individual failure rules
//!
//! Each rule is a trigger threshold plus a constructor, evaluated against a
//! shared [`FailureContext`] so rules can be tested in isolation.

use crate::config::TargetBands;
use crate::models::{ConfidenceLevel, FailurePrediction, TelemetrySample};
use crate::stats::{fixed, mean, tail, Signal};

/// Samples considered "recent" by the economizer and combustion rules
const RECENT_SAMPLES: usize = 5;

/// Running averages over the whole window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowAverages {
    pub pressure: f64,
    pub stack_temp: f64,
    pub o2: f64,
    pub efficiency: f64,
}

impl WindowAverages {
    pub fn from_window(window: &[TelemetrySample]) -> Self {
        Self {
            pressure: mean(&Signal::SteamPressure.series(window)),
            stack_temp: mean(&Signal::StackTemp.series(window)),
            o2: mean(&Signal::O2Level.series(window)),
            efficiency: mean(&Signal::Efficiency.series(window)),
        }
    }
}

/// Inputs shared by all failure rules
#[derive(Debug, Clone)]
pub struct FailureContext<'a> {
    pub window: &'a [TelemetrySample],
    pub latest: &'a TelemetrySample,
    pub averages: WindowAverages,
    pub targets: &'a TargetBands,
}

impl<'a> FailureContext<'a> {
    /// Build a context; `None` for an empty window
    pub fn new(window: &'a [TelemetrySample], targets: &'a TargetBands) -> Option<Self> {
        let latest = window.last()?;
        Some(Self {
            window,
            latest,
            averages: WindowAverages::from_window(window),
            targets,
        })
    }

    fn recent(&self) -> &'a [TelemetrySample] {
        tail(self.window, RECENT_SAMPLES)
    }
}

/// The component failure rules, in evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureRule {
    SuperheaterTubes,
    EconomizerFouling,
    CombustionControl,
    FeedwaterPump,
}

impl FailureRule {
    pub const ALL: [FailureRule; 4] = [
        FailureRule::SuperheaterTubes,
        FailureRule::EconomizerFouling,
        FailureRule::CombustionControl,
        FailureRule::FeedwaterPump,
    ];

    /// Component name reported in predictions
    pub fn component(&self) -> &'static str {
        match self {
            FailureRule::SuperheaterTubes => "Superheater Tubes",
            FailureRule::EconomizerFouling => "Economizer",
            FailureRule::CombustionControl => "Combustion Control System",
            FailureRule::FeedwaterPump => "Feed Water Pump",
        }
    }

    /// Evaluate the rule; `noise` is a uniform draw in [0, 1)
    ///
    /// Only the economizer rule reads `noise`.
    pub fn evaluate(&self, ctx: &FailureContext<'_>, noise: f64) -> Option<FailurePrediction> {
        match self {
            FailureRule::SuperheaterTubes => superheater_tubes(ctx),
            FailureRule::EconomizerFouling => economizer_fouling(ctx, noise),
            FailureRule::CombustionControl => combustion_control(ctx),
            FailureRule::FeedwaterPump => feedwater_pump(ctx),
        }
    }

    fn prediction(
        &self,
        probability: f64,
        days: f64,
        confidence: ConfidenceLevel,
        indicators: Vec<String>,
    ) -> FailurePrediction {
        FailurePrediction {
            component: self.component().to_string(),
            failure_probability: probability,
            days_until_failure: days.max(0.0).round() as u32,
            confidence_level: confidence,
            indicators,
        }
    }
}

/// Superheater stress probability from pressure and stack temperature overshoot
pub fn superheater_risk(latest: &TelemetrySample, targets: &TargetBands) -> f64 {
    let pressure_stress = ((latest.steam_pressure - targets.pressure_setpoint_bar) / 5.0).max(0.0) * 30.0;
    let temp_stress = ((latest.stack_temp - targets.superheater_stack_temp_c) / 20.0).max(0.0) * 40.0;
    (pressure_stress + temp_stress).min(100.0)
}

fn superheater_tubes(ctx: &FailureContext<'_>) -> Option<FailurePrediction> {
    let risk = superheater_risk(ctx.latest, ctx.targets);
    if risk <= 30.0 {
        return None;
    }

    let confidence = if risk > 70.0 {
        ConfidenceLevel::High
    } else if risk > 50.0 {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };

    Some(FailureRule::SuperheaterTubes.prediction(
        risk,
        (60.0 - risk).max(7.0),
        confidence,
        vec![
            format!(
                "Pressure: {} bar (avg: {})",
                fixed(ctx.latest.steam_pressure, 1),
                fixed(ctx.averages.pressure, 1)
            ),
            format!(
                "Stack Temp: {}°C (avg: {})",
                ctx.latest.stack_temp,
                fixed(ctx.averages.stack_temp, 0)
            ),
            "Thermal cycling stress detected".to_string(),
        ],
    ))
}

fn economizer_fouling(ctx: &FailureContext<'_>, noise: f64) -> Option<FailurePrediction> {
    let recent_temp = mean(&Signal::StackTemp.series(ctx.recent()));
    let temp_trend = recent_temp - ctx.averages.stack_temp;
    let risk = (temp_trend * 8.0 + noise * 20.0).max(0.0);
    if risk <= 25.0 {
        return None;
    }

    let confidence = if risk > 60.0 {
        ConfidenceLevel::High
    } else {
        ConfidenceLevel::Medium
    };

    Some(FailureRule::EconomizerFouling.prediction(
        risk,
        (90.0 - risk * 1.5).max(14.0),
        confidence,
        vec![
            format!("Rising stack temperature trend: +{}°C", fixed(temp_trend, 1)),
            format!(
                "Current efficiency: {}% (baseline: {}%)",
                fixed(ctx.latest.efficiency, 1),
                fixed(ctx.averages.efficiency, 1)
            ),
            "Soot accumulation likely".to_string(),
        ],
    ))
}

/// Largest step between consecutive O₂ readings in the recent samples, times 10
pub fn o2_oscillation(recent: &[TelemetrySample]) -> f64 {
    recent
        .windows(2)
        .map(|w| (w[1].o2_level - w[0].o2_level).abs())
        .fold(0.0, f64::max)
        * 10.0
}

fn combustion_control(ctx: &FailureContext<'_>) -> Option<FailurePrediction> {
    let oscillation = o2_oscillation(ctx.recent());
    if oscillation <= 15.0 {
        return None;
    }

    Some(FailureRule::CombustionControl.prediction(
        oscillation,
        30.0,
        ConfidenceLevel::High,
        vec![
            format!("High O₂ oscillation detected: {}%", fixed(oscillation, 1)),
            "Burner control valve sticking suspected".to_string(),
            "Fuel-air ratio unstable".to_string(),
        ],
    ))
}

fn feedwater_pump(ctx: &FailureContext<'_>) -> Option<FailurePrediction> {
    let pressure_drop = ctx.averages.pressure - ctx.latest.steam_pressure;
    let degradation = (pressure_drop * 15.0).max(0.0);
    if degradation <= 20.0 {
        return None;
    }

    Some(FailureRule::FeedwaterPump.prediction(
        degradation,
        45.0,
        ConfidenceLevel::Medium,
        vec![
            format!("Pressure drop detected: {} bar", fixed(pressure_drop, 1)),
            "Pump efficiency declining".to_string(),
        ],
    ))
}
