//! # Cable Sizing
//!
//! Rule-of-thumb conductor sizing by design current for clipped-direct
//! twin and earth, with an optional voltage drop check that steps the size
//! up until the run complies.
//!
//! | Current | Size |
//! |--------:|-----:|
//! | ≤ 10 A | 1.5mm² |
//! | ≤ 16 A | 2.5mm² |
//! | ≤ 25 A | 4mm² |
//! | ≤ 32 A | 6mm² |
//! | ≤ 40 A | 10mm² |
//! | above | 16mm² or larger |
//!
//! This is a first pass only. It does not apply grouping, ambient
//! temperature or insulation derating factors.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::voltage_drop::{evaluate, CircuitClass, Phase, VoltageDropResult};
use crate::errors::{require_positive, CalcResult};
use crate::tables::CableSize;

/// Ordered (max current, size) thresholds. Anything above the last is 16mm²+.
const CURRENT_THRESHOLDS: [(f64, CableSize); 5] = [
    (10.0, CableSize::Mm1_5),
    (16.0, CableSize::Mm2_5),
    (25.0, CableSize::Mm4),
    (32.0, CableSize::Mm6),
    (40.0, CableSize::Mm10),
];

/// Size picked from the current thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentSizing {
    pub size: CableSize,
    /// Above every threshold: 16mm² is the floor, not the answer
    pub sixteen_or_larger: bool,
}

impl CurrentSizing {
    pub fn describe(&self) -> String {
        if self.sixteen_or_larger {
            format!("{} or larger", self.size.display_name())
        } else {
            self.size.display_name().to_string()
        }
    }
}

/// Smallest size that passes the voltage drop check for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropSizing {
    /// Recommended size (largest in the table when nothing complies)
    pub size: CableSize,
    pub check: VoltageDropResult,
    /// No table size brings the run within the limit
    pub no_compliant_size: bool,
}

/// Input for cable sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CableSizingInput {
    pub label: String,
    pub current_a: f64,
    /// When given, the current-based size is checked for voltage drop
    #[serde(default)]
    pub length_m: Option<f64>,
    #[serde(default = "default_circuit")]
    pub circuit: CircuitClass,
    #[serde(default)]
    pub phase: Phase,
}

fn default_circuit() -> CircuitClass {
    CircuitClass::Power
}

/// Result of cable sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CableSizingResult {
    pub by_current: CurrentSizing,
    pub by_voltage_drop: Option<VoltageDropSizing>,
}

impl CableSizingResult {
    /// The size to install: the voltage drop size when checked, else by current.
    pub fn recommended(&self) -> CableSize {
        match &self.by_voltage_drop {
            Some(vd) => vd.size,
            None => self.by_current.size,
        }
    }
}

/// Size a cable by design current alone.
pub fn size_for_current(current_a: f64) -> CurrentSizing {
    for (max_current, size) in CURRENT_THRESHOLDS {
        if current_a <= max_current {
            return CurrentSizing {
                size,
                sixteen_or_larger: false,
            };
        }
    }
    CurrentSizing {
        size: CableSize::Mm16,
        sixteen_or_larger: true,
    }
}

/// Step up from the current-based size until the run complies.
pub fn size_for_voltage_drop(current_a: f64, length_m: f64, circuit: CircuitClass, phase: Phase) -> VoltageDropSizing {
    let mut size = size_for_current(current_a).size;
    loop {
        let check = evaluate(current_a, length_m, size, circuit, phase);
        if check.compliant {
            return VoltageDropSizing {
                size,
                check,
                no_compliant_size: false,
            };
        }
        match size.next_larger() {
            Some(next) => size = next,
            None => {
                return VoltageDropSizing {
                    size,
                    check,
                    no_compliant_size: true,
                }
            }
        }
    }
}

/// Run cable sizing.
pub fn calculate(input: &CableSizingInput) -> CalcResult<CableSizingResult> {
    require_positive("current_a", input.current_a)?;
    let by_current = size_for_current(input.current_a);

    let by_voltage_drop = match input.length_m {
        Some(length_m) => {
            require_positive("length_m", length_m)?;
            Some(size_for_voltage_drop(input.current_a, length_m, input.circuit, input.phase))
        }
        None => None,
    };

    debug!(
        label = %input.label,
        current_a = input.current_a,
        by_current = %by_current.size,
        "cable sized"
    );

    Ok(CableSizingResult {
        by_current,
        by_voltage_drop,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thresholds() {
        let cases = [
            (6.0, CableSize::Mm1_5),
            (10.0, CableSize::Mm1_5),
            (10.5, CableSize::Mm2_5),
            (16.0, CableSize::Mm2_5),
            (20.0, CableSize::Mm4),
            (32.0, CableSize::Mm6),
            (40.0, CableSize::Mm10),
        ];
        for (current, expected) in cases {
            let sizing = size_for_current(current);
            assert_eq!(sizing.size, expected, "{} A", current);
            assert!(!sizing.sixteen_or_larger);
        }
    }

    #[test]
    fn test_above_forty_amps_is_flagged() {
        let sizing = size_for_current(63.0);
        assert_eq!(sizing.size, CableSize::Mm16);
        assert!(sizing.sixteen_or_larger);
        assert_eq!(sizing.describe(), "16mm² or larger");
    }

    #[test]
    fn test_short_run_keeps_current_size() {
        let vd = size_for_voltage_drop(20.0, 10.0, CircuitClass::Power, Phase::Single);
        assert_eq!(vd.size, CableSize::Mm4);
        assert!(vd.check.compliant);
    }

    #[test]
    fn test_long_run_steps_up() {
        // 32 A over 40 m: 6mm² gives 32 * 40 * 0.00308 * 2 = 7.88 V (3.43%), fine for power
        // but over the 3% lighting limit, so lighting steps to 10mm².
        let power = size_for_voltage_drop(32.0, 40.0, CircuitClass::Power, Phase::Single);
        assert_eq!(power.size, CableSize::Mm6);
        let lighting = size_for_voltage_drop(32.0, 40.0, CircuitClass::Lighting, Phase::Single);
        assert_eq!(lighting.size, CableSize::Mm10);
        assert!(lighting.check.compliant);
    }

    #[test]
    fn test_no_compliant_size() {
        let vd = size_for_voltage_drop(100.0, 2000.0, CircuitClass::Power, Phase::Single);
        assert!(vd.no_compliant_size);
        assert_eq!(vd.size, CableSize::Mm50);
        assert!(!vd.check.compliant);
    }

    #[test]
    fn test_calculate_with_and_without_length() {
        let mut input = CableSizingInput {
            label: "Shower".to_string(),
            current_a: 40.0,
            length_m: None,
            circuit: CircuitClass::Power,
            phase: Phase::Single,
        };
        let result = calculate(&input).unwrap();
        assert!(result.by_voltage_drop.is_none());
        assert_eq!(result.recommended(), CableSize::Mm10);

        input.length_m = Some(35.0);
        let result = calculate(&input).unwrap();
        // 40 * 35 * 0.00183 * 2 = 5.124 V = 2.23%
        assert_eq!(result.recommended(), CableSize::Mm10);

        input.length_m = Some(0.0);
        assert!(calculate(&input).is_err());
    }
}
