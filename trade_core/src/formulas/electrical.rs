//! # Voltage Drop Formulas
//!
//! Closed-form voltage drop arithmetic for copper cable runs.
//!
//! ## Notation
//!
//! - `I` = Design current (A)
//! - `L` = Route length, one way (m)
//! - `R` = Conductor resistance per metre (Ω/m)
//! - `k` = Circuit factor: 2 for single-phase (live out, neutral back),
//!   2 × 0.866 = √3 for balanced three-phase
//! - `U0` = Nominal supply voltage (230 V single-phase, 400 V three-phase)
//!
//! ## References
//!
//! - BS 7671:2018+A2:2022 Appendix 4, section 6.4 and Table 4D1B
//! - BS 7671 Appendix 12: voltage drop limits for consumers' installations

/// Nominal single-phase supply voltage (V)
pub const SINGLE_PHASE_SUPPLY_V: f64 = 230.0;

/// Nominal three-phase line voltage (V)
pub const THREE_PHASE_SUPPLY_V: f64 = 400.0;

/// Loop factor for a single-phase circuit (live + neutral)
pub const SINGLE_PHASE_FACTOR: f64 = 2.0;

/// Three-phase multiplier applied to the single-phase loop figure
pub const THREE_PHASE_MULTIPLIER: f64 = 0.866;

/// Circuit factor for a balanced three-phase circuit
pub const THREE_PHASE_FACTOR: f64 = SINGLE_PHASE_FACTOR * THREE_PHASE_MULTIPLIER;

/// Permitted drop for lighting circuits (% of U0)
pub const LIGHTING_LIMIT_PERCENT: f64 = 3.0;

/// Permitted drop for power and other circuits (% of U0)
pub const POWER_LIMIT_PERCENT: f64 = 5.0;

/// Voltage drop along a run.
///
/// # Formula
/// Vd = I × L × R × k
///
/// # Example
/// ```rust
/// use trade_core::formulas::electrical::{voltage_drop_volts, SINGLE_PHASE_FACTOR};
///
/// // 20 A over 10 m of 2.5mm² (7.41 mΩ/m)
/// let vd = voltage_drop_volts(20.0, 10.0, 0.00741, SINGLE_PHASE_FACTOR);
/// assert!((vd - 2.964).abs() < 1e-9);
/// ```
#[inline]
pub fn voltage_drop_volts(current_a: f64, length_m: f64, resistance_ohm_per_m: f64, factor: f64) -> f64 {
    current_a * length_m * resistance_ohm_per_m * factor
}

/// Voltage drop expressed as a percentage of the nominal supply.
///
/// # Formula
/// Vd% = Vd / U0 × 100
#[inline]
pub fn percent_of_supply(drop_v: f64, supply_v: f64) -> f64 {
    drop_v / supply_v * 100.0
}

/// Longest run that stays within `limit_percent` of the supply.
///
/// # Formula
/// L_max = (limit% / 100 × U0) / (I × R × k)
#[inline]
pub fn max_run_length_m(
    current_a: f64,
    resistance_ohm_per_m: f64,
    factor: f64,
    supply_v: f64,
    limit_percent: f64,
) -> f64 {
    (limit_percent / 100.0 * supply_v) / (current_a * resistance_ohm_per_m * factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        let vd = voltage_drop_volts(20.0, 10.0, 0.00741, SINGLE_PHASE_FACTOR);
        assert!((vd - 2.964).abs() < 1e-9);
        let pct = percent_of_supply(vd, SINGLE_PHASE_SUPPLY_V);
        assert!((pct - 1.2887).abs() < 0.001);
    }

    #[test]
    fn test_three_phase_factor_is_root_three() {
        assert!((THREE_PHASE_FACTOR - 3f64.sqrt()).abs() < 0.001);
    }

    #[test]
    fn test_max_run_length_hits_limit() {
        let r = 0.00741;
        let l_max = max_run_length_m(20.0, r, SINGLE_PHASE_FACTOR, SINGLE_PHASE_SUPPLY_V, POWER_LIMIT_PERCENT);
        let vd = voltage_drop_volts(20.0, l_max, r, SINGLE_PHASE_FACTOR);
        assert!((percent_of_supply(vd, SINGLE_PHASE_SUPPLY_V) - 5.0).abs() < 1e-9);
    }
}
