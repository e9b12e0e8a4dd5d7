//! Descriptive statistics over telemetry signals
//!
//! All dispersion figures use the population standard deviation
//! (divide by `n`), which is what the downstream scoring scales assume.

use crate::models::{TelemetrySample, Trend};

/// Standard deviation of first differences above which a signal is volatile
const VOLATILITY_THRESHOLD: f64 = 1.5;

/// Mean first difference beyond which a signal is rising or falling
const DIRECTION_THRESHOLD: f64 = 0.5;

/// Summary statistics of a value sequence
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Stats {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub range: f64,
}

impl Stats {
    /// Compute statistics for `values`
    ///
    /// An empty slice yields all-zero statistics rather than NaN.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let mean = mean(values);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            mean,
            std_dev: population_variance(values, mean).sqrt(),
            min,
            max,
            range: max - min,
        }
    }
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn population_variance(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation; 0 for an empty slice
pub fn std_dev(values: &[f64]) -> f64 {
    population_variance(values, mean(values)).sqrt()
}

fn first_differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Mean of successive differences; 0 when fewer than two values
pub fn rate_of_change(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    mean(&first_differences(values))
}

/// Classify the direction of a sequence
///
/// Volatility is checked before direction, so a noisy climb is `Volatile`.
pub fn trend(values: &[f64]) -> Trend {
    if values.len() < 2 {
        return Trend::Stable;
    }

    let diffs = first_differences(values);
    let avg_diff = mean(&diffs);
    let variance = population_variance(&diffs, avg_diff);

    if variance.sqrt() > VOLATILITY_THRESHOLD {
        Trend::Volatile
    } else if avg_diff > DIRECTION_THRESHOLD {
        Trend::Rising
    } else if avg_diff < -DIRECTION_THRESHOLD {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Telemetry channels the analyzers pull out of a window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    SteamPressure,
    SteamFlow,
    StackTemp,
    O2Level,
    Efficiency,
    FuelFlow,
}

impl Signal {
    pub fn read(&self, sample: &TelemetrySample) -> f64 {
        match self {
            Signal::SteamPressure => sample.steam_pressure,
            Signal::SteamFlow => sample.steam_flow,
            Signal::StackTemp => sample.stack_temp,
            Signal::O2Level => sample.o2_level,
            Signal::Efficiency => sample.efficiency,
            Signal::FuelFlow => sample.fuel_flow,
        }
    }

    /// Extract this channel from every sample, preserving order
    pub fn series(&self, window: &[TelemetrySample]) -> Vec<f64> {
        window.iter().map(|s| self.read(s)).collect()
    }
}

/// The trailing `n` samples of a window (or all of them if shorter)
pub fn tail(window: &[TelemetrySample], n: usize) -> &[TelemetrySample] {
    &window[window.len().saturating_sub(n)..]
}

/// Digits past the requested precision inspected for an exact tie
const TIE_DIGITS: usize = 30;

/// Format `value` with `decimals` places, rounding exact ties away from zero
///
/// `{:.N}` rounds ties to even, so 16.5 would print as "16".
pub fn fixed(value: f64, decimals: usize) -> String {
    let expanded = format!("{:.*}", decimals + TIE_DIGITS, value);
    let tie = expanded.ends_with(&format!("5{}", "0".repeat(TIE_DIGITS - 1)));
    if tie && value.is_finite() {
        // The next float away from zero sits just past the tie
        let nudged = f64::from_bits(value.to_bits() + 1);
        format!("{:.*}", decimals, nudged)
    } else {
        format!("{:.*}", decimals, value)
    }
}
