//! Component failure prediction
//!
//! Rule-based estimators driven by deviations from the window's running
//! averages. Each rule is evaluated independently and only emits a
//! prediction when its probability clears a rule-specific threshold.

mod rules;

pub use rules::{FailureContext, FailureRule, WindowAverages};

use rand::Rng;
use tracing::debug;

use crate::config::TargetBands;
use crate::models::{FailurePrediction, FuelType, TelemetrySample};

/// Predicts boiler component failures from a telemetry window
#[derive(Debug, Clone, Default)]
pub struct FailurePredictor {
    targets: TargetBands,
}

impl FailurePredictor {
    pub fn new(targets: TargetBands) -> Self {
        Self { targets }
    }

    /// Evaluate every failure rule over `window`
    ///
    /// `rng` supplies the economizer rule's noise term; pass a seeded or
    /// mock generator for reproducible output. The fuel type is accepted for
    /// interface compatibility and does not change any rule's arithmetic.
    /// Results are sorted by descending failure probability.
    pub fn predict<R: Rng + ?Sized>(
        &self,
        window: &[TelemetrySample],
        fuel: FuelType,
        rng: &mut R,
    ) -> Vec<FailurePrediction> {
        let Some(ctx) = FailureContext::new(window, &self.targets) else {
            debug!(fuel = %fuel, "No telemetry for failure prediction");
            return Vec::new();
        };

        let noise: f64 = rng.gen();

        let mut predictions: Vec<FailurePrediction> = FailureRule::ALL
            .iter()
            .filter_map(|rule| rule.evaluate(&ctx, noise))
            .collect();

        predictions.sort_by(|a, b| b.failure_probability.total_cmp(&a.failure_probability));

        debug!(
            fuel = %fuel,
            samples = window.len(),
            predictions = predictions.len(),
            "Failure prediction complete"
        );
        predictions
    }

    /// Evaluate with the thread-local generator
    pub fn predict_with_thread_rng(
        &self,
        window: &[TelemetrySample],
        fuel: FuelType,
    ) -> Vec<FailurePrediction> {
        self.predict(window, fuel, &mut rand::thread_rng())
    }
}
