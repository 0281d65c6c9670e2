//! # Generic Quantity Calculation
//!
//! The one shape every material estimate shares: a quantity, the coverage of
//! one unit, and a waste allowance, rounded up to whole units. The concrete,
//! plaster, tile, drainage, roofing and joinery calculators are all this
//! function with their own constants.
//!
//! ## Example
//!
//! ```rust
//! use trade_core::calculations::quantity::{QuantityInput, calculate};
//!
//! let input = QuantityInput {
//!     label: "Kitchen skim".to_string(),
//!     quantity: 21.0,
//!     coverage_per_unit: 10.0,
//!     waste_percent: 10.0,
//!     unit_name: "bag".to_string(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.units, 3);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, require_waste_percent, CalcResult};
use crate::formulas::quantities::{raw_units, round_up_units};

/// Input for a free-form quantity estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantityInput {
    /// User label
    pub label: String,
    /// Area, volume or length to cover
    pub quantity: f64,
    /// How much of `quantity` one unit covers
    pub coverage_per_unit: f64,
    /// Waste allowance, 0-100 %
    pub waste_percent: f64,
    /// Name of the unit (e.g., "bag", "sheet")
    pub unit_name: String,
}

/// Rounded and unrounded unit counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitEstimate {
    /// Fractional units including waste
    pub raw_units: f64,
    /// Whole units to buy
    pub units: u32,
}

/// Result of a free-form quantity estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityResult {
    pub raw_units: f64,
    pub units: u32,
    pub unit_name: String,
}

/// Validate and estimate whole units for a quantity.
///
/// `field` prefixes the validation error so the caller's form field is named.
pub fn estimate_units(
    field: &str,
    quantity: f64,
    coverage_per_unit: f64,
    waste_percent: f64,
) -> CalcResult<UnitEstimate> {
    require_non_negative(field, quantity)?;
    require_positive("coverage_per_unit", coverage_per_unit)?;
    require_waste_percent("waste_percent", waste_percent)?;

    let raw = raw_units(quantity, coverage_per_unit, waste_percent);
    Ok(UnitEstimate {
        raw_units: raw,
        units: round_up_units(raw),
    })
}

/// Run a free-form quantity estimate.
pub fn calculate(input: &QuantityInput) -> CalcResult<QuantityResult> {
    let estimate = estimate_units("quantity", input.quantity, input.coverage_per_unit, input.waste_percent)?;
    Ok(QuantityResult {
        raw_units: estimate.raw_units,
        units: estimate.units,
        unit_name: input.unit_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(quantity: f64, waste_percent: f64) -> QuantityInput {
        QuantityInput {
            label: "test".to_string(),
            quantity,
            coverage_per_unit: 2.88,
            waste_percent,
            unit_name: "sheet".to_string(),
        }
    }

    #[test]
    fn test_units_are_ceiling_of_raw() {
        for q in [0.5, 3.0, 7.7, 14.4, 40.0, 123.4] {
            let result = calculate(&input(q, 10.0)).unwrap();
            assert_eq!(result.units as f64, result.raw_units.ceil(), "q = {}", q);
        }
    }

    #[test]
    fn test_units_non_decreasing_in_waste() {
        let mut last = 0;
        for waste in 0..=100 {
            let result = calculate(&input(30.0, waste as f64)).unwrap();
            assert!(result.units >= last);
            last = result.units;
        }
        // 30 / 2.88 = 10.42 -> 11; doubled = 20.83 -> 21
        assert_eq!(calculate(&input(30.0, 0.0)).unwrap().units, 11);
        assert_eq!(calculate(&input(30.0, 100.0)).unwrap().units, 21);
    }

    #[test]
    fn test_validation() {
        assert!(calculate(&input(-1.0, 10.0)).is_err());
        assert!(calculate(&input(10.0, -1.0)).is_err());
        assert!(calculate(&input(10.0, 150.0)).is_err());
        assert!(calculate(&input(f64::NAN, 10.0)).is_err());

        let mut bad = input(10.0, 10.0);
        bad.coverage_per_unit = 0.0;
        assert!(calculate(&bad).is_err());
    }

    #[test]
    fn test_zero_quantity_needs_nothing() {
        assert_eq!(calculate(&input(0.0, 10.0)).unwrap().units, 0);
    }
}
