//! # Quotes
//!
//! Priced line items and a summary block, ready to hand to whatever renders
//! the customer-facing document.
//!
//! ## Summary Arithmetic
//!
//! ```text
//! contingency = (materials + labour) × c / 100
//! net         = materials + labour + contingency
//! vat         = net × 20%   (when VAT registered)
//! total       = net + vat
//! ```

use serde::{Deserialize, Serialize};

use crate::formulas::tax::{vat_on, VAT_STANDARD_RATE};
use crate::units::Gbp;

/// Which summary bucket a line counts towards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCategory {
    /// Materials and plant hire
    Materials,
    Labour,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub description: String,
    pub quantity: f64,
    pub unit: String,
    pub unit_price: Gbp,
    pub total: Gbp,
    pub category: LineCategory,
}

impl QuoteLine {
    pub fn new(
        description: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        unit_price: Gbp,
        category: LineCategory,
    ) -> Self {
        QuoteLine {
            description: description.into(),
            quantity,
            unit: unit.into(),
            unit_price,
            total: (unit_price * quantity).round_pence(),
            category,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSummary {
    pub materials: Gbp,
    pub labour: Gbp,
    pub contingency: Gbp,
    pub net: Gbp,
    pub vat: Gbp,
    pub total: Gbp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub title: String,
    pub lines: Vec<QuoteLine>,
    pub summary: QuoteSummary,
    /// Price list the material lines were priced from
    pub price_list_version: String,
}

impl Quote {
    /// Total the lines into a quote.
    pub fn build(
        title: impl Into<String>,
        lines: Vec<QuoteLine>,
        contingency_percent: f64,
        apply_vat: bool,
        price_list_version: impl Into<String>,
    ) -> Self {
        let bucket = |category: LineCategory| -> Gbp {
            lines.iter().filter(|l| l.category == category).map(|l| l.total).sum()
        };
        let materials = bucket(LineCategory::Materials);
        let labour = bucket(LineCategory::Labour);
        let contingency = ((materials + labour) * (contingency_percent / 100.0)).round_pence();
        let net = materials + labour + contingency;
        let vat = if apply_vat {
            Gbp(vat_on(net.0, VAT_STANDARD_RATE)).round_pence()
        } else {
            Gbp(0.0)
        };

        Quote {
            title: title.into(),
            lines,
            summary: QuoteSummary {
                materials,
                labour,
                contingency,
                net,
                vat,
                total: net + vat,
            },
            price_list_version: price_list_version.into(),
        }
    }

    pub fn lines_in(&self, category: LineCategory) -> impl Iterator<Item = &QuoteLine> {
        self.lines.iter().filter(move |l| l.category == category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let lines = vec![
            QuoteLine::new("Slates", 100.0, "each", Gbp(2.20), LineCategory::Materials),
            QuoteLine::new("Roofer", 2.0, "day", Gbp(250.0), LineCategory::Labour),
        ];
        let quote = Quote::build("Repair", lines, 10.0, true, "2025-Q4");
        assert!((quote.summary.materials.0 - 220.0).abs() < 1e-9);
        assert_eq!(quote.summary.labour, Gbp(500.0));
        assert!((quote.summary.contingency.0 - 72.0).abs() < 1e-9);
        assert!((quote.summary.net.0 - 792.0).abs() < 1e-9);
        assert!((quote.summary.vat.0 - 158.4).abs() < 1e-9);
        assert!((quote.summary.total.0 - 950.4).abs() < 1e-9);
        assert_eq!(quote.lines_in(LineCategory::Labour).count(), 1);
    }

    #[test]
    fn test_no_vat() {
        let lines = vec![QuoteLine::new("Labour", 1.0, "day", Gbp(200.0), LineCategory::Labour)];
        let quote = Quote::build("Small job", lines, 0.0, false, "2025-Q4");
        assert_eq!(quote.summary.vat, Gbp(0.0));
        assert_eq!(quote.summary.total, Gbp(200.0));
    }

    #[test]
    fn test_line_total_rounds_to_pence() {
        let line = QuoteLine::new("Tiles", 3.0, "each", Gbp(0.333), LineCategory::Materials);
        assert_eq!(line.total, Gbp(1.0));
    }
}
