//! # CIS Tax Calculation
//!
//! Construction Industry Scheme deductions on a subcontractor invoice.
//!
//! CIS is withheld from the labour element only; materials pass through
//! untouched. The contractor pays the deduction to HMRC on the
//! subcontractor's behalf.
//!
//! ## Example
//!
//! ```rust
//! use trade_core::calculations::cis_tax::{CisGrossToNetInput, CisRate, gross_to_net};
//!
//! let input = CisGrossToNetInput {
//!     label: "Invoice 104".to_string(),
//!     labour: 1000.0,
//!     materials: 200.0,
//!     rate: CisRate::Registered,
//!     apply_vat: false,
//! };
//!
//! let result = gross_to_net(&input).unwrap();
//! assert_eq!(result.cis_deduction.0, 200.0);
//! assert_eq!(result.net_labour.0, 800.0);
//! assert_eq!(result.subtotal.0, 1000.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_non_negative, CalcError, CalcResult};
use crate::formulas::tax::{cis_deduction, gross_from_net, net_of_cis, vat_on, VAT_STANDARD_RATE};
use crate::units::Gbp;

/// CIS deduction rate. HMRC only uses these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CisRate {
    /// 0%
    GrossPaymentStatus,
    /// 20%
    #[default]
    Registered,
    /// 30%
    Unregistered,
}

impl CisRate {
    pub const ALL: [CisRate; 3] = [CisRate::GrossPaymentStatus, CisRate::Registered, CisRate::Unregistered];

    pub fn rate(&self) -> f64 {
        match self {
            CisRate::GrossPaymentStatus => 0.0,
            CisRate::Registered => 0.20,
            CisRate::Unregistered => 0.30,
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            CisRate::GrossPaymentStatus => 0,
            CisRate::Registered => 20,
            CisRate::Unregistered => 30,
        }
    }

    /// Map a percentage from a form field. Anything else is rejected.
    pub fn from_percent(percent: u32) -> CalcResult<Self> {
        match percent {
            0 => Ok(CisRate::GrossPaymentStatus),
            20 => Ok(CisRate::Registered),
            30 => Ok(CisRate::Unregistered),
            other => Err(CalcError::unknown_entry("cis_rate", format!("{}%", other))),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CisRate::GrossPaymentStatus => "Gross payment status (0%)",
            CisRate::Registered => "Registered (20%)",
            CisRate::Unregistered => "Unregistered (30%)",
        }
    }
}

// ============================================================================
// Gross to Net
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CisGrossToNetInput {
    pub label: String,
    /// Labour element before deduction (£)
    pub labour: f64,
    /// Materials at cost (£)
    #[serde(default)]
    pub materials: f64,
    #[serde(default)]
    pub rate: CisRate,
    /// Add standard-rate VAT to the subtotal
    #[serde(default)]
    pub apply_vat: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CisGrossToNetResult {
    pub rate: CisRate,
    pub labour: Gbp,
    pub materials: Gbp,
    pub cis_deduction: Gbp,
    pub net_labour: Gbp,
    pub subtotal: Gbp,
    pub vat: Gbp,
    pub grand_total: Gbp,
    /// Paid over to HMRC by the contractor; always equals the deduction
    pub hmrc_payment: Gbp,
}

pub fn gross_to_net(input: &CisGrossToNetInput) -> CalcResult<CisGrossToNetResult> {
    require_non_negative("labour", input.labour)?;
    require_non_negative("materials", input.materials)?;

    let rate = input.rate.rate();
    let deduction = Gbp(cis_deduction(input.labour, rate));
    let net_labour = Gbp(net_of_cis(input.labour, rate));
    let subtotal = net_labour + Gbp(input.materials);
    let vat = if input.apply_vat {
        Gbp(vat_on(subtotal.0, VAT_STANDARD_RATE))
    } else {
        Gbp(0.0)
    };

    debug!(
        label = %input.label,
        rate_percent = input.rate.percent(),
        deduction = deduction.0,
        "cis gross to net"
    );

    Ok(CisGrossToNetResult {
        rate: input.rate,
        labour: Gbp(input.labour),
        materials: Gbp(input.materials),
        cis_deduction: deduction,
        net_labour,
        subtotal,
        vat,
        grand_total: subtotal + vat,
        hmrc_payment: deduction,
    })
}

// ============================================================================
// Net to Gross
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CisNetToGrossInput {
    pub label: String,
    /// Labour the subcontractor wants to receive after deduction (£)
    pub net_labour: f64,
    #[serde(default)]
    pub rate: CisRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CisNetToGrossResult {
    pub rate: CisRate,
    pub net_labour: Gbp,
    pub required_gross: Gbp,
    pub cis_deduction: Gbp,
}

pub fn net_to_gross(input: &CisNetToGrossInput) -> CalcResult<CisNetToGrossResult> {
    require_non_negative("net_labour", input.net_labour)?;

    let required_gross = Gbp(gross_from_net(input.net_labour, input.rate.rate()));
    let deduction = required_gross - Gbp(input.net_labour);

    debug!(
        label = %input.label,
        rate_percent = input.rate.percent(),
        gross = required_gross.0,
        "cis net to gross"
    );

    Ok(CisNetToGrossResult {
        rate: input.rate,
        net_labour: Gbp(input.net_labour),
        required_gross,
        cis_deduction: deduction,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(labour: f64, materials: f64, rate: CisRate, apply_vat: bool) -> CisGrossToNetInput {
        CisGrossToNetInput {
            label: "test".to_string(),
            labour,
            materials,
            rate,
            apply_vat,
        }
    }

    #[test]
    fn test_worked_example() {
        let result = gross_to_net(&invoice(1000.0, 200.0, CisRate::Registered, false)).unwrap();
        assert_eq!(result.cis_deduction, Gbp(200.0));
        assert_eq!(result.net_labour, Gbp(800.0));
        assert_eq!(result.subtotal, Gbp(1000.0));
        assert_eq!(result.vat, Gbp(0.0));
        assert_eq!(result.grand_total, Gbp(1000.0));
        assert_eq!(result.hmrc_payment, Gbp(200.0));
    }

    #[test]
    fn test_vat_on_subtotal() {
        let result = gross_to_net(&invoice(1000.0, 200.0, CisRate::Registered, true)).unwrap();
        assert!((result.vat.0 - 200.0).abs() < 1e-9);
        assert!((result.grand_total.0 - 1200.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates() {
        let gross = gross_to_net(&invoice(1000.0, 0.0, CisRate::GrossPaymentStatus, false)).unwrap();
        assert_eq!(gross.cis_deduction, Gbp(0.0));
        let unregistered = gross_to_net(&invoice(1000.0, 0.0, CisRate::Unregistered, false)).unwrap();
        assert!((unregistered.net_labour.0 - 700.0).abs() < 1e-9);
    }

    #[test]
    fn test_net_to_gross_is_inverse() {
        for rate in CisRate::ALL {
            for labour in [0.0, 1.0, 250.0, 1000.0, 12345.67] {
                let forward = gross_to_net(&invoice(labour, 0.0, rate, false)).unwrap();
                let back = net_to_gross(&CisNetToGrossInput {
                    label: "inverse".to_string(),
                    net_labour: forward.net_labour.0,
                    rate,
                })
                .unwrap();
                assert!((back.required_gross.0 - labour).abs() < 1e-6, "{:?} {}", rate, labour);
            }
        }
    }

    #[test]
    fn test_from_percent() {
        assert_eq!(CisRate::from_percent(20).unwrap(), CisRate::Registered);
        let err = CisRate::from_percent(25).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_TABLE_ENTRY");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(gross_to_net(&invoice(-1.0, 0.0, CisRate::Registered, false)).is_err());
        assert!(gross_to_net(&invoice(1.0, -1.0, CisRate::Registered, false)).is_err());
    }
}
