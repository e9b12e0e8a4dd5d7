//! Energy loss analysis
//!
//! Compares the latest thermal loss with the baseline, attributes the
//! excess to a driver and prices the recoverable portion.

use tracing::debug;

use crate::config::{CostModel, TargetBands};
use crate::models::{EnergyLossAnalysis, LossDriver, LossSeverity, TelemetrySample};
use crate::stats::{mean, tail, Signal};

/// Samples averaged when checking for a fouling-driven efficiency drop
const RECENT_EFFICIENCY_SAMPLES: usize = 10;

/// Stack temperature above which flue gas carries excess heat (°C)
const FLUE_GAS_STACK_TEMP_C: f64 = 180.0;

/// Flue gas loss turns critical above this stack temperature (°C)
const FLUE_GAS_CRITICAL_STACK_TEMP_C: f64 = 190.0;

/// O₂ above which hot flue gas is blamed on excess air (%)
const FLUE_GAS_O2_PCT: f64 = 4.0;

/// Classifies and prices excess thermal loss
#[derive(Debug, Clone, Default)]
pub struct EnergyLossAnalyzer {
    costs: CostModel,
    targets: TargetBands,
}

impl EnergyLossAnalyzer {
    pub fn new(costs: CostModel, targets: TargetBands) -> Self {
        Self { costs, targets }
    }

    /// Analyze the window against `baseline_efficiency` (%)
    ///
    /// An empty window reports baseline loss with no driver and no recovery.
    pub fn analyze(&self, window: &[TelemetrySample], baseline_efficiency: f64) -> EnergyLossAnalysis {
        let normal_loss = 100.0 - baseline_efficiency;

        let Some(latest) = window.last() else {
            debug!("No telemetry for energy loss analysis");
            return EnergyLossAnalysis {
                normal_energy_loss: normal_loss,
                catastrophic_energy_loss: normal_loss,
                loss_driver: LossDriver::Unknown,
                severity: LossSeverity::Normal,
                recovery_potential: 0.0,
            };
        };

        let current_loss = 100.0 - latest.efficiency;
        let recent_avg = mean(&Signal::Efficiency.series(tail(window, RECENT_EFFICIENCY_SAMPLES)));
        let (loss_driver, severity) = self.classify(latest, recent_avg);

        EnergyLossAnalysis {
            normal_energy_loss: normal_loss,
            catastrophic_energy_loss: current_loss,
            loss_driver,
            severity,
            recovery_potential: self.costs.monthly_cost(current_loss - normal_loss).max(0.0),
        }
    }

    /// First matching driver wins
    fn classify(&self, latest: &TelemetrySample, recent_avg_efficiency: f64) -> (LossDriver, LossSeverity) {
        if latest.stack_temp > FLUE_GAS_STACK_TEMP_C && latest.o2_level > FLUE_GAS_O2_PCT {
            let severity = if latest.stack_temp > FLUE_GAS_CRITICAL_STACK_TEMP_C {
                LossSeverity::Critical
            } else {
                LossSeverity::Warning
            };
            (LossDriver::FlueGasHeatLoss, severity)
        } else if latest.o2_level < self.targets.o2_low_pct {
            (LossDriver::IncompleteCombustion, LossSeverity::Critical)
        } else if latest.efficiency < recent_avg_efficiency - 5.0 {
            (LossDriver::TubeFouling, LossSeverity::Warning)
        } else {
            (LossDriver::Unknown, LossSeverity::Normal)
        }
    }
}
