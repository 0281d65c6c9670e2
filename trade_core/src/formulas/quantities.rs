//! # Material Quantity Formulas
//!
//! Every material estimate reduces to the same shape: a geometric quantity
//! (area, volume or length) divided by what one unit covers, inflated by a
//! waste allowance and rounded up to whole units.
//!
//! ```text
//! units = ceil(quantity / coverage_per_unit × (1 + waste% / 100))
//! ```

/// Float slop tolerated before rounding up, so that 0.3 / 0.1 does not
/// become 4 bags.
const ROUNDING_EPSILON: f64 = 1e-9;

/// Multiplier for a waste allowance given in percent.
#[inline]
pub fn waste_multiplier(waste_percent: f64) -> f64 {
    1.0 + waste_percent / 100.0
}

/// Fractional unit count before rounding.
///
/// # Formula
/// raw = Q / C × (1 + w/100)
#[inline]
pub fn raw_units(quantity: f64, coverage_per_unit: f64, waste_percent: f64) -> f64 {
    quantity / coverage_per_unit * waste_multiplier(waste_percent)
}

/// Round a fractional unit count up to whole units.
#[inline]
pub fn round_up_units(raw: f64) -> u32 {
    let units = (raw - ROUNDING_EPSILON).ceil();
    if units <= 0.0 {
        0
    } else {
        units as u32
    }
}

/// Whole units needed, waste included.
///
/// # Example
/// ```rust
/// use trade_core::formulas::quantities::rounded_units;
///
/// // 21 m² of skim, one 25kg bag per 10 m², 10% waste
/// assert_eq!(rounded_units(21.0, 10.0, 10.0), 3);
/// ```
#[inline]
pub fn rounded_units(quantity: f64, coverage_per_unit: f64, waste_percent: f64) -> u32 {
    round_up_units(raw_units(quantity, coverage_per_unit, waste_percent))
}

/// Rectangular volume.
///
/// # Formula
/// V = L × W × D
#[inline]
pub fn rectangular_volume(length: f64, width: f64, depth: f64) -> f64 {
    length * width * depth
}

/// True roof slope area from plan area and pitch.
///
/// # Formula
/// A_slope = A_plan / cos(θ)
#[inline]
pub fn pitched_area(plan_area_m2: f64, pitch_deg: f64) -> f64 {
    plan_area_m2 / pitch_deg.to_radians().cos()
}

/// Number of members at fixed centres along a run, both ends included.
///
/// # Formula
/// n = ceil(L / s) + 1
#[inline]
pub fn members_at_centres(run_m: f64, centres_m: f64) -> u32 {
    round_up_units(run_m / centres_m) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_units_is_ceiling() {
        assert_eq!(rounded_units(20.0, 10.0, 0.0), 2);
        assert_eq!(rounded_units(20.1, 10.0, 0.0), 3);
        assert_eq!(rounded_units(0.3, 0.1, 0.0), 3);
        assert_eq!(rounded_units(0.0, 10.0, 10.0), 0);
    }

    #[test]
    fn test_waste_pushes_over_boundary() {
        assert_eq!(rounded_units(20.0, 10.0, 0.0), 2);
        assert_eq!(rounded_units(20.0, 10.0, 5.0), 3);
    }

    #[test]
    fn test_pitched_area() {
        assert!((pitched_area(10.0, 0.0) - 10.0).abs() < 1e-12);
        assert!((pitched_area(10.0, 60.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_members_at_centres() {
        // 3.6 m wall at 600 centres: 6 bays, 7 studs
        assert_eq!(members_at_centres(3.6, 0.6), 7);
        assert_eq!(members_at_centres(3.7, 0.6), 8);
    }
}
