//! Latent-space rule table
//!
//! Each rule pairs a trigger over [`WindowFeatures`] with a builder for the
//! finding it reports. Rules are independent; their order in [`RULES`] is
//! the evaluation order and breaks ties when insights are ranked.

use super::features::WindowFeatures;
use crate::stats::fixed;
use crate::models::{InsightCategory, InsightSeverity, LatentSpaceInsight};

/// Rule output before it is tagged with the rule's category
#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: InsightSeverity,
    pub title: String,
    pub description: String,
    pub evidence: Vec<String>,
    pub action_required: String,
    pub potential_impact: String,
    pub confidence: f64,
}

/// A named trigger/builder pair
pub struct LatentRule {
    pub id: &'static str,
    pub category: InsightCategory,
    trigger: fn(&WindowFeatures) -> bool,
    build: fn(&WindowFeatures) -> Finding,
}

impl LatentRule {
    pub fn triggers(&self, features: &WindowFeatures) -> bool {
        (self.trigger)(features)
    }

    /// Build the insight if the trigger holds
    pub fn evaluate(&self, features: &WindowFeatures) -> Option<LatentSpaceInsight> {
        if !self.triggers(features) {
            return None;
        }

        let finding = (self.build)(features);
        Some(LatentSpaceInsight {
            category: self.category,
            severity: finding.severity,
            title: finding.title,
            description: finding.description,
            evidence: finding.evidence,
            action_required: finding.action_required,
            potential_impact: finding.potential_impact,
            confidence: finding.confidence,
        })
    }
}

impl std::fmt::Debug for LatentRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatentRule")
            .field("id", &self.id)
            .field("category", &self.category)
            .finish()
    }
}

/// Every latent-space rule, in evaluation order
pub static RULES: [LatentRule; 13] = [
    LatentRule {
        id: "tube_wall_thinning",
        category: InsightCategory::Damage,
        trigger: tube_wall_thinning_trigger,
        build: tube_wall_thinning,
    },
    LatentRule {
        id: "refractory_degradation",
        category: InsightCategory::Damage,
        trigger: refractory_degradation_trigger,
        build: refractory_degradation,
    },
    LatentRule {
        id: "accelerated_fouling",
        category: InsightCategory::Damage,
        trigger: accelerated_fouling_trigger,
        build: accelerated_fouling,
    },
    LatentRule {
        id: "combustion_instability",
        category: InsightCategory::Hazard,
        trigger: combustion_instability_trigger,
        build: combustion_instability,
    },
    LatentRule {
        id: "over_firing",
        category: InsightCategory::Hazard,
        trigger: over_firing_trigger,
        build: over_firing,
    },
    LatentRule {
        id: "drum_level_anomaly",
        category: InsightCategory::Hazard,
        trigger: drum_level_anomaly_trigger,
        build: drum_level_anomaly,
    },
    LatentRule {
        id: "economizer_failure_precursor",
        category: InsightCategory::Failure,
        trigger: economizer_failure_trigger,
        build: economizer_failure,
    },
    LatentRule {
        id: "id_fan_degradation",
        category: InsightCategory::Failure,
        trigger: id_fan_degradation_trigger,
        build: id_fan_degradation,
    },
    LatentRule {
        id: "control_valve_hunting",
        category: InsightCategory::Failure,
        trigger: control_valve_hunting_trigger,
        build: control_valve_hunting,
    },
    LatentRule {
        id: "excess_air_reduction",
        category: InsightCategory::Opportunity,
        trigger: excess_air_trigger,
        build: excess_air,
    },
    LatentRule {
        id: "flue_gas_heat_recovery",
        category: InsightCategory::Opportunity,
        trigger: heat_recovery_trigger,
        build: heat_recovery,
    },
    LatentRule {
        id: "load_point_optimization",
        category: InsightCategory::Opportunity,
        trigger: load_optimization_trigger,
        build: load_optimization,
    },
    LatentRule {
        id: "blowdown_heat_recovery",
        category: InsightCategory::Opportunity,
        trigger: blowdown_recovery_trigger,
        build: blowdown_recovery,
    },
];

/// Look up a rule by id
pub fn rule(id: &str) -> Option<&'static LatentRule> {
    RULES.iter().find(|r| r.id == id)
}

fn lakhs(amount: f64) -> f64 {
    amount / 100_000.0
}

// Damage

// Pressure sagging while steam flow holds: internal tube erosion or corrosion
fn tube_wall_thinning_trigger(f: &WindowFeatures) -> bool {
    f.pressure_roc < -0.15 && f.steam_flow_roc.abs() < 0.3
}

fn tube_wall_thinning(f: &WindowFeatures) -> Finding {
    Finding {
        severity: if f.pressure_roc < -0.3 {
            InsightSeverity::High
        } else {
            InsightSeverity::Medium
        },
        title: "Tube Wall Thinning Detected".to_string(),
        description: "Consistent pressure decline without flow reduction suggests internal tube erosion or corrosion, potentially from fly ash or chemical attack.".to_string(),
        evidence: vec![
            format!("Pressure declining at {} bar/reading", fixed(f.pressure_roc.abs(), 2)),
            format!("Steam flow stable (variance: {} TPH)", fixed(f.steam_flow.std_dev, 2)),
            format!("Current pressure: {} bar", fixed(f.latest.steam_pressure, 1)),
        ],
        action_required: "Schedule ultrasonic thickness testing within 7 days".to_string(),
        potential_impact: "Tube rupture risk - potential forced outage of 3-5 days".to_string(),
        confidence: (60.0 + f.pressure_roc.abs() * 50.0).min(85.0),
    }
}

// Hot stack and falling efficiency with steady O₂: heat escaping through the lining
fn refractory_degradation_trigger(f: &WindowFeatures) -> bool {
    f.latest.stack_temp > 175.0 && f.efficiency_roc < -0.1 && f.o2_roc.abs() < 0.1
}

fn refractory_degradation(f: &WindowFeatures) -> Finding {
    Finding {
        severity: if f.latest.stack_temp > 185.0 {
            InsightSeverity::High
        } else {
            InsightSeverity::Medium
        },
        title: "Refractory Degradation Suspected".to_string(),
        description: "Elevated flue gas temperature with efficiency loss despite stable combustion indicates refractory lining damage allowing heat escape.".to_string(),
        evidence: vec![
            format!("Stack temperature: {}°C (elevated)", f.latest.stack_temp),
            format!("Efficiency declining: {}%/reading", fixed(f.efficiency_roc.abs(), 2)),
            format!("O₂ stable at {}% (combustion normal)", fixed(f.latest.o2_level, 1)),
        ],
        action_required: "Visual inspection of furnace refractory during next shutdown".to_string(),
        potential_impact: "Energy loss ₹15-25 lakhs/month, structural integrity risk".to_string(),
        confidence: 72.0,
    }
}

fn accelerated_fouling_trigger(f: &WindowFeatures) -> bool {
    f.stack_temp_roc > 0.3 && f.efficiency_roc < -0.05
}

fn accelerated_fouling(f: &WindowFeatures) -> Finding {
    Finding {
        severity: if f.stack_temp_roc > 0.6 {
            InsightSeverity::High
        } else {
            InsightSeverity::Medium
        },
        title: "Accelerated Fouling - Soot Blower Issue".to_string(),
        description: "Rapid heat transfer degradation pattern indicates soot blower system may be malfunctioning or fouling rate exceeds cleaning capacity.".to_string(),
        evidence: vec![
            format!("Stack temp rising at {}°C/reading", fixed(f.stack_temp_roc, 2)),
            format!("Efficiency dropping at {}%/reading", fixed(f.efficiency_roc.abs(), 2)),
            format!("Current efficiency: {}%", fixed(f.latest.efficiency, 1)),
        ],
        action_required: "Verify soot blower operation, check steam supply pressure".to_string(),
        potential_impact: "Reduced heat transfer, tube overheating risk".to_string(),
        confidence: 78.0,
    }
}

// Hazards

// Erratic, lean-side O₂: unstable flame
fn combustion_instability_trigger(f: &WindowFeatures) -> bool {
    f.o2.std_dev > 0.8 && f.o2.mean < 3.5
}

fn combustion_instability(f: &WindowFeatures) -> Finding {
    Finding {
        severity: if f.o2.std_dev > 1.2 {
            InsightSeverity::Critical
        } else {
            InsightSeverity::High
        },
        title: "Combustion Instability - Flame-out Risk".to_string(),
        description: "Erratic O₂ levels with low average indicate unstable flame conditions. Risk of flame-out followed by explosive re-ignition.".to_string(),
        evidence: vec![
            format!("O₂ volatility: ±{}% (high)", fixed(f.o2.std_dev, 2)),
            format!("Average O₂: {}% (below optimal 3.5-4.5%)", fixed(f.o2.mean, 1)),
            format!("O₂ range: {}% - {}%", fixed(f.o2.min, 1), fixed(f.o2.max, 1)),
        ],
        action_required: "IMMEDIATE: Check burner igniter, flame scanner, fuel supply stability".to_string(),
        potential_impact: "Furnace explosion risk - critical safety hazard".to_string(),
        confidence: 88.0,
    }
}

fn over_firing_trigger(f: &WindowFeatures) -> bool {
    f.latest.fuel_flow > 6000.0 && f.pressure.mean > 66.0 && f.stack_temp.mean > 170.0
}

fn over_firing(f: &WindowFeatures) -> Finding {
    Finding {
        severity: InsightSeverity::High,
        title: "Over-firing Condition Detected".to_string(),
        description: "Boiler operating above design parameters. Sustained over-firing causes accelerated creep damage and safety valve lifting.".to_string(),
        evidence: vec![
            format!("Fuel flow: {} kg/hr (high)", f.latest.fuel_flow),
            format!("Average pressure: {} bar", fixed(f.pressure.mean, 1)),
            format!("Average stack temp: {}°C", fixed(f.stack_temp.mean, 0)),
        ],
        action_required: "Reduce firing rate, verify load demand, check pressure transmitters".to_string(),
        potential_impact: "Safety valve damage, tube failure risk".to_string(),
        confidence: 82.0,
    }
}

// Pressure climbing while steam flow falls: drum level control problem
fn drum_level_anomaly_trigger(f: &WindowFeatures) -> bool {
    f.pressure_roc > 0.2 && f.steam_flow_roc < -0.3
}

fn drum_level_anomaly(f: &WindowFeatures) -> Finding {
    Finding {
        severity: InsightSeverity::Critical,
        title: "Drum Level Anomaly - Low Water Risk".to_string(),
        description: "Inverse relationship between pressure and flow suggests potential drum level control issue. Low water condition can cause catastrophic tube failure.".to_string(),
        evidence: vec![
            format!("Pressure rising: +{} bar/reading", fixed(f.pressure_roc, 2)),
            format!("Steam flow declining: {} TPH/reading", fixed(f.steam_flow_roc, 2)),
            "Pattern indicates possible feedwater interruption".to_string(),
        ],
        action_required: "IMMEDIATE: Verify drum level indication, check feedwater pumps".to_string(),
        potential_impact: "Catastrophic tube failure if water level drops below safe limit".to_string(),
        confidence: 75.0,
    }
}

// Failure precursors

fn economizer_failure_trigger(f: &WindowFeatures) -> bool {
    f.stack_temp.mean > 178.0 && f.latest.efficiency < f.efficiency.mean - 2.0
}

fn economizer_failure(f: &WindowFeatures) -> Finding {
    Finding {
        severity: InsightSeverity::High,
        title: "Economizer Approaching Failure Point".to_string(),
        description: "Severe fouling pattern indicates economizer tubes experiencing thermal stress. Continued operation risks tube leak or rupture.".to_string(),
        evidence: vec![
            format!("Average stack temp: {}°C (critically high)", fixed(f.stack_temp.mean, 0)),
            format!(
                "Efficiency below baseline by {}%",
                fixed(f.efficiency.mean - f.latest.efficiency, 1)
            ),
            format!(
                "Estimated fouling factor: {}x normal",
                fixed((f.stack_temp.mean - 160.0) / 5.0, 1)
            ),
        ],
        action_required: "Schedule chemical cleaning or mechanical tube cleaning within 14 days".to_string(),
        potential_impact: "Economizer leak causing forced outage 5-10 days, repair cost ₹5-15 lakhs".to_string(),
        confidence: 80.0,
    }
}

// Stack temperature swinging without a fuel change: draft problem
fn id_fan_degradation_trigger(f: &WindowFeatures) -> bool {
    f.stack_temp.std_dev > 3.0 && f.fuel_flow_roc < 0.5
}

fn id_fan_degradation(f: &WindowFeatures) -> Finding {
    Finding {
        severity: InsightSeverity::Medium,
        title: "ID Fan Performance Degradation".to_string(),
        description: "Draft fluctuations without fuel changes suggest ID fan bearing wear or damper malfunction affecting flue gas flow.".to_string(),
        evidence: vec![
            format!("Stack temp volatility: ±{}°C", fixed(f.stack_temp.std_dev, 1)),
            format!("Fuel flow stable (change: {} kg/hr)", fixed(f.fuel_flow_roc, 1)),
            "Draft imbalance suspected".to_string(),
        ],
        action_required: "Check ID fan vibration levels, bearing temperature".to_string(),
        potential_impact: "Fan failure causes boiler trip - 24-72 hour outage".to_string(),
        confidence: 65.0,
    }
}

fn control_valve_hunting_trigger(f: &WindowFeatures) -> bool {
    f.o2.std_dev > 0.6 && f.pressure.std_dev > 1.0
}

fn control_valve_hunting(f: &WindowFeatures) -> Finding {
    Finding {
        severity: InsightSeverity::Medium,
        title: "Control Valve Hunting Detected".to_string(),
        description: "Coupled oscillation in O₂ and pressure indicates control valve sticking or actuator failure. Valve may fail in current position.".to_string(),
        evidence: vec![
            format!("O₂ oscillation: ±{}%", fixed(f.o2.std_dev, 2)),
            format!("Pressure oscillation: ±{} bar", fixed(f.pressure.std_dev, 2)),
            "Control loop instability confirmed".to_string(),
        ],
        action_required: "Inspect FD fan damper actuator and fuel control valve".to_string(),
        potential_impact: "Loss of combustion control, potential trip on high/low fuel-air ratio".to_string(),
        confidence: 70.0,
    }
}

// Opportunities

// Steady O₂ held above optimal: tunable excess air
fn excess_air_trigger(f: &WindowFeatures) -> bool {
    f.o2.mean > 4.2 && f.o2.std_dev < 0.5
}

fn excess_air(f: &WindowFeatures) -> Finding {
    let excess_air_pct = (f.o2.mean - 3.5) * 5.0;
    let monthly_saving = excess_air_pct * 0.3 * 100_000.0;

    Finding {
        severity: InsightSeverity::Low,
        title: "Excess Air Reduction Opportunity".to_string(),
        description: format!(
            "O₂ levels consistently above optimal indicate excess combustion air. Reducing to 3.5-4% can improve efficiency by {}%.",
            fixed(excess_air_pct * 0.5, 1)
        ),
        evidence: vec![
            format!("Average O₂: {}% (optimal: 3.5-4%)", fixed(f.o2.mean, 1)),
            format!("O₂ stable (std dev: {}%) - good for tuning", fixed(f.o2.std_dev, 2)),
            format!("Estimated excess air: {}%", fixed(excess_air_pct, 0)),
        ],
        action_required: "Perform combustion tuning - adjust FD fan/damper setpoints".to_string(),
        potential_impact: format!("Fuel savings: ₹{} lakhs/month", fixed(lakhs(monthly_saving), 1)),
        confidence: 85.0,
    }
}

fn heat_recovery_trigger(f: &WindowFeatures) -> bool {
    f.latest.stack_temp > 170.0 && f.o2.mean > 3.0 && f.o2.mean < 4.5
}

fn heat_recovery(f: &WindowFeatures) -> Finding {
    let excess_temp = f.latest.stack_temp - 150.0;
    let monthly_saving = excess_temp * 5000.0;

    Finding {
        severity: InsightSeverity::Low,
        title: "Flue Gas Heat Recovery Potential".to_string(),
        description: "Stack temperature above 170°C with optimal combustion indicates significant recoverable heat. Consider air preheater upgrade or economizer enhancement.".to_string(),
        evidence: vec![
            format!("Stack temperature: {}°C (150°C is benchmark)", f.latest.stack_temp),
            format!("Combustion quality: Good (O₂ at {}%)", fixed(f.o2.mean, 1)),
            format!("Recoverable heat: ~{} kW", fixed(excess_temp * 0.8, 0)),
        ],
        action_required: "Evaluate air preheater retrofit or economizer surface addition".to_string(),
        potential_impact: format!(
            "Fuel savings: ₹{} lakhs/month, ROI: 18-24 months",
            fixed(lakhs(monthly_saving), 1)
        ),
        confidence: 75.0,
    }
}

fn load_optimization_trigger(f: &WindowFeatures) -> bool {
    f.latest.efficiency < 83.0 && f.steam_flow.mean < 45.0
}

fn load_optimization(f: &WindowFeatures) -> Finding {
    Finding {
        severity: InsightSeverity::Medium,
        title: "Suboptimal Load Point Operation".to_string(),
        description: "Current operating load is below boiler efficiency sweet spot. Consider load consolidation or scheduling optimization.".to_string(),
        evidence: vec![
            format!("Current efficiency: {}%", fixed(f.latest.efficiency, 1)),
            format!("Average steam flow: {} TPH", fixed(f.steam_flow.mean, 1)),
            "Optimal load range typically 70-90% MCR".to_string(),
        ],
        action_required: "Review plant load scheduling, consider load shifting".to_string(),
        potential_impact: "Efficiency gain of 2-4% possible by operating at optimal load".to_string(),
        confidence: 68.0,
    }
}

// Continuous blowdown is assumed for any high-pressure operation
fn blowdown_recovery_trigger(f: &WindowFeatures) -> bool {
    f.pressure.mean > 63.0
}

fn blowdown_recovery(f: &WindowFeatures) -> Finding {
    Finding {
        severity: InsightSeverity::Low,
        title: "Blowdown Heat Recovery System".to_string(),
        description: "High-pressure operation means significant energy in blowdown water. Flash tank or heat exchanger can recover this energy.".to_string(),
        evidence: vec![
            format!("Operating pressure: {} bar", fixed(f.pressure.mean, 1)),
            "Assumed blowdown: 3-5% of feedwater".to_string(),
            "Blowdown enthalpy: ~300 kcal/kg recoverable".to_string(),
        ],
        action_required: "Install or verify blowdown heat recovery system".to_string(),
        potential_impact: "Energy recovery: 1-2% efficiency improvement".to_string(),
        confidence: 60.0,
    }
}
