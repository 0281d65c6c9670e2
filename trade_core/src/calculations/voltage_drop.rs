//! # Voltage Drop Calculation
//!
//! Checks a final circuit against the BS 7671 Appendix 12 voltage drop
//! limits: 3% for lighting and 5% for other uses.
//!
//! ## Example
//!
//! ```rust
//! use trade_core::calculations::voltage_drop::{VoltageDropInput, CircuitClass, Phase, calculate};
//!
//! let input = VoltageDropInput {
//!     label: "Kitchen ring".to_string(),
//!     current_a: 20.0,
//!     length_m: 10.0,
//!     cable_mm2: 2.5,
//!     circuit: CircuitClass::Power,
//!     phase: Phase::Single,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.voltage_drop_v - 2.964).abs() < 1e-9);
//! assert!(result.compliant);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_positive, CalcResult};
use crate::formulas::electrical::{
    max_run_length_m, percent_of_supply, voltage_drop_volts, LIGHTING_LIMIT_PERCENT, POWER_LIMIT_PERCENT,
    SINGLE_PHASE_FACTOR, SINGLE_PHASE_SUPPLY_V, THREE_PHASE_FACTOR, THREE_PHASE_SUPPLY_V,
};
use crate::tables::CableSize;

/// What the circuit feeds. Decides the permitted drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircuitClass {
    Lighting,
    Power,
}

impl CircuitClass {
    /// Maximum permitted drop, % of nominal supply
    pub fn limit_percent(&self) -> f64 {
        match self {
            CircuitClass::Lighting => LIGHTING_LIMIT_PERCENT,
            CircuitClass::Power => POWER_LIMIT_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Single,
    Three,
}

impl Phase {
    /// Multiplier applied to I × L × R
    pub fn factor(&self) -> f64 {
        match self {
            Phase::Single => SINGLE_PHASE_FACTOR,
            Phase::Three => THREE_PHASE_FACTOR,
        }
    }

    /// Nominal supply voltage
    pub fn supply_v(&self) -> f64 {
        match self {
            Phase::Single => SINGLE_PHASE_SUPPLY_V,
            Phase::Three => THREE_PHASE_SUPPLY_V,
        }
    }
}

/// Input for a voltage drop check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoltageDropInput {
    pub label: String,
    /// Design current (A)
    pub current_a: f64,
    /// One-way run length (m)
    pub length_m: f64,
    /// Conductor cross-section (mm²). Sizes not in the table fall back to 2.5mm².
    pub cable_mm2: f64,
    pub circuit: CircuitClass,
    #[serde(default)]
    pub phase: Phase,
}

/// Result of a voltage drop check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    /// Cable the figures were worked out for
    pub cable: CableSize,
    /// True when the requested size was not in the table
    pub cable_defaulted: bool,
    pub resistance_mohm_per_m: f64,
    pub voltage_drop_v: f64,
    pub voltage_drop_percent: f64,
    pub supply_v: f64,
    pub limit_percent: f64,
    pub compliant: bool,
    /// Longest run of this cable at this current within the limit (m)
    pub max_run_length_m: f64,
}

impl VoltageDropResult {
    /// Headroom below the limit in percentage points (negative when over).
    pub fn margin_percent(&self) -> f64 {
        self.limit_percent - self.voltage_drop_percent
    }
}

/// Resolve a requested size against the table, falling back to 2.5mm².
pub fn resolve_cable(cable_mm2: f64) -> (CableSize, bool) {
    match CableSize::from_mm2(cable_mm2) {
        Some(size) => (size, false),
        None => (CableSize::default(), true),
    }
}

/// Voltage drop figures for a known cable. Inputs are assumed validated.
pub(crate) fn evaluate(
    current_a: f64,
    length_m: f64,
    cable: CableSize,
    circuit: CircuitClass,
    phase: Phase,
) -> VoltageDropResult {
    let resistance = cable.resistance_ohm_per_m();
    let factor = phase.factor();
    let supply_v = phase.supply_v();
    let limit_percent = circuit.limit_percent();

    let voltage_drop_v = voltage_drop_volts(current_a, length_m, resistance, factor);
    let voltage_drop_percent = percent_of_supply(voltage_drop_v, supply_v);

    VoltageDropResult {
        cable,
        cable_defaulted: false,
        resistance_mohm_per_m: cable.resistance_mohm_per_m(),
        voltage_drop_v,
        voltage_drop_percent,
        supply_v,
        limit_percent,
        compliant: voltage_drop_percent <= limit_percent,
        max_run_length_m: max_run_length_m(current_a, resistance, factor, supply_v, limit_percent),
    }
}

/// Run a voltage drop check.
pub fn calculate(input: &VoltageDropInput) -> CalcResult<VoltageDropResult> {
    require_positive("current_a", input.current_a)?;
    require_positive("length_m", input.length_m)?;

    let (cable, cable_defaulted) = resolve_cable(input.cable_mm2);
    if cable_defaulted {
        debug!(requested_mm2 = input.cable_mm2, "cable size not in table, using 2.5mm²");
    }

    let mut result = evaluate(input.current_a, input.length_m, cable, input.circuit, input.phase);
    result.cable_defaulted = cable_defaulted;

    debug!(
        label = %input.label,
        cable = %cable,
        drop_v = result.voltage_drop_v,
        drop_percent = result.voltage_drop_percent,
        compliant = result.compliant,
        "voltage drop calculated"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power(current_a: f64, length_m: f64, cable_mm2: f64) -> VoltageDropInput {
        VoltageDropInput {
            label: "test".to_string(),
            current_a,
            length_m,
            cable_mm2,
            circuit: CircuitClass::Power,
            phase: Phase::Single,
        }
    }

    #[test]
    fn test_worked_example() {
        let result = calculate(&power(20.0, 10.0, 2.5)).unwrap();
        assert!((result.voltage_drop_v - 2.964).abs() < 1e-9);
        assert!((result.voltage_drop_percent - 1.29).abs() < 0.005);
        assert_eq!(result.limit_percent, 5.0);
        assert!(result.compliant);
        assert!(!result.cable_defaulted);
        assert_eq!(result.cable, CableSize::Mm2_5);
    }

    #[test]
    fn test_unknown_size_defaults_to_2_5() {
        let result = calculate(&power(20.0, 10.0, 3.0)).unwrap();
        assert!(result.cable_defaulted);
        assert_eq!(result.cable, CableSize::Mm2_5);
        assert!((result.voltage_drop_v - 2.964).abs() < 1e-9);
    }

    #[test]
    fn test_lighting_limit_is_tighter() {
        // 6 A over 30 m of 1.0mm²: 6 * 30 * 0.0181 * 2 = 6.516 V = 2.83%
        let mut input = power(6.0, 30.0, 1.0);
        input.circuit = CircuitClass::Lighting;
        let result = calculate(&input).unwrap();
        assert_eq!(result.limit_percent, 3.0);
        assert!(result.compliant);

        input.length_m = 35.0;
        assert!(!calculate(&input).unwrap().compliant);
    }

    #[test]
    fn test_drop_monotonic_in_current_and_length() {
        let mut last = 0.0;
        for i in 1..=40 {
            let drop = calculate(&power(i as f64, 15.0, 2.5)).unwrap().voltage_drop_v;
            assert!(drop > last);
            last = drop;
        }
        let mut last = 0.0;
        for l in 1..=60 {
            let drop = calculate(&power(16.0, l as f64, 2.5)).unwrap().voltage_drop_v;
            assert!(drop > last);
            last = drop;
        }
    }

    #[test]
    fn test_max_run_length_is_compliance_boundary() {
        let result = calculate(&power(32.0, 20.0, 4.0)).unwrap();
        let at_limit = calculate(&power(32.0, result.max_run_length_m, 4.0)).unwrap();
        assert!((at_limit.voltage_drop_percent - 5.0).abs() < 1e-9);
        let beyond = calculate(&power(32.0, result.max_run_length_m * 1.01, 4.0)).unwrap();
        assert!(!beyond.compliant);
    }

    #[test]
    fn test_three_phase_uses_400v() {
        let mut input = power(20.0, 10.0, 2.5);
        input.phase = Phase::Three;
        let result = calculate(&input).unwrap();
        assert_eq!(result.supply_v, 400.0);
        // 20 * 10 * 0.00741 * 1.732
        assert!((result.voltage_drop_v - 2.566824).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        assert!(calculate(&power(0.0, 10.0, 2.5)).is_err());
        assert!(calculate(&power(-5.0, 10.0, 2.5)).is_err());
        assert!(calculate(&power(20.0, 0.0, 2.5)).is_err());
        assert!(calculate(&power(f64::INFINITY, 10.0, 2.5)).is_err());
        assert!(calculate(&power(20.0, f64::NAN, 2.5)).is_err());
    }

    #[test]
    fn test_phase_defaults_to_single() {
        let json = r#"{"label":"x","current_a":10.0,"length_m":5.0,"cable_mm2":1.5,"circuit":"lighting"}"#;
        let input: VoltageDropInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.phase, Phase::Single);
    }
}
