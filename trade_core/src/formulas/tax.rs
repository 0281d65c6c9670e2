//! # CIS and VAT Formulas
//!
//! Construction Industry Scheme deductions are taken from the labour element
//! of a subcontractor's invoice only; materials pass through untaxed.
//!
//! ## References
//!
//! - HMRC CIS340: Construction Industry Scheme guide for contractors and subcontractors
//! - HMRC VAT Notice 700: standard rate

/// UK standard rate of VAT
pub const VAT_STANDARD_RATE: f64 = 0.20;

/// CIS deduction on a labour amount.
///
/// # Formula
/// D = labour × r
#[inline]
pub fn cis_deduction(labour: f64, rate: f64) -> f64 {
    labour * rate
}

/// Labour amount left after the CIS deduction.
///
/// # Formula
/// net = labour × (1 − r)
#[inline]
pub fn net_of_cis(labour: f64, rate: f64) -> f64 {
    labour - cis_deduction(labour, rate)
}

/// Gross labour that must be invoiced to receive `net_labour` after deduction.
///
/// Undefined for r = 1; the CIS rate set never contains it.
///
/// # Formula
/// gross = net / (1 − r)
#[inline]
pub fn gross_from_net(net_labour: f64, rate: f64) -> f64 {
    net_labour / (1.0 - rate)
}

/// VAT due on an amount.
#[inline]
pub fn vat_on(amount: f64, rate: f64) -> f64 {
    amount * rate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deduction() {
        assert_eq!(cis_deduction(1000.0, 0.20), 200.0);
        assert_eq!(net_of_cis(1000.0, 0.20), 800.0);
        assert_eq!(net_of_cis(1000.0, 0.0), 1000.0);
    }

    #[test]
    fn test_gross_from_net_inverts_deduction() {
        for rate in [0.0, 0.20, 0.30] {
            let gross = gross_from_net(700.0, rate);
            assert!((net_of_cis(gross, rate) - 700.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_vat() {
        assert!((vat_on(1000.0, VAT_STANDARD_RATE) - 200.0).abs() < 1e-9);
    }
}
