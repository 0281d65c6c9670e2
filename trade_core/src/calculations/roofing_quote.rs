//! # Roofing Repair Quote
//!
//! Prices a roofing materials estimate with labour, scaffold hire and a
//! contingency, producing a [`Quote`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::roofing::{self, RoofingInput, RoofingResult};
use crate::errors::{require_non_negative, require_percent, CalcResult};
use crate::pricing::PriceList;
use crate::quote::{LineCategory, Quote, QuoteLine};
use crate::units::Gbp;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofRepairQuoteInput {
    pub label: String,
    pub roofing: RoofingInput,
    pub labour_days: f64,
    /// Rate per person per day (£)
    pub day_rate: f64,
    #[serde(default)]
    pub scaffold_weeks: f64,
    #[serde(default)]
    pub contingency_percent: f64,
    #[serde(default)]
    pub apply_vat: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofRepairQuoteResult {
    pub materials: RoofingResult,
    pub quote: Quote,
}

pub fn calculate(input: &RoofRepairQuoteInput, prices: &PriceList) -> CalcResult<RoofRepairQuoteResult> {
    require_non_negative("labour_days", input.labour_days)?;
    require_non_negative("day_rate", input.day_rate)?;
    require_non_negative("scaffold_weeks", input.scaffold_weeks)?;
    require_percent("contingency_percent", input.contingency_percent)?;

    let materials = roofing::calculate(&input.roofing, prices)?;
    let tile = materials.tile;

    let mut lines = vec![
        QuoteLine::new(
            tile.display_name(),
            materials.tiles as f64,
            "each",
            tile.unit_price(prices),
            LineCategory::Materials,
        ),
        QuoteLine::new(
            "Treated batten, 4.8 m",
            materials.batten_lengths as f64,
            "length",
            prices.roofing.batten_4_8m,
            LineCategory::Materials,
        ),
        QuoteLine::new(
            "Breathable underlay",
            materials.underlay_rolls as f64,
            "roll",
            prices.roofing.underlay_roll,
            LineCategory::Materials,
        ),
    ];

    if input.scaffold_weeks > 0.0 {
        lines.push(QuoteLine::new(
            "Scaffold hire",
            input.scaffold_weeks,
            "week",
            prices.roofing.scaffold_per_week,
            LineCategory::Materials,
        ));
    }

    if input.labour_days > 0.0 {
        lines.push(QuoteLine::new(
            "Roofer",
            input.labour_days,
            "day",
            Gbp(input.day_rate),
            LineCategory::Labour,
        ));
    }

    let quote = Quote::build(
        input.label.clone(),
        lines,
        input.contingency_percent,
        input.apply_vat,
        prices.version.clone(),
    );

    debug!(
        label = %input.label,
        net = quote.summary.net.0,
        total = quote.summary.total.0,
        "roof repair quote built"
    );

    Ok(RoofRepairQuoteResult { materials, quote })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::roofing::RoofTile;
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn repair() -> RoofRepairQuoteInput {
        RoofRepairQuoteInput {
            label: "Storm damage, 12 Acacia Ave".to_string(),
            roofing: RoofingInput {
                label: "Front slope".to_string(),
                plan_area_m2: 10.0,
                pitch_deg: 35.0,
                tile: RoofTile::NaturalSlate,
                waste_percent: 10.0,
            },
            labour_days: 3.0,
            day_rate: 220.0,
            scaffold_weeks: 1.0,
            contingency_percent: 10.0,
            apply_vat: true,
        }
    }

    #[test]
    fn test_quote_lines_and_summary() {
        let result = calculate(&repair(), &DEFAULT_PRICE_LIST).unwrap();
        let quote = &result.quote;
        assert_eq!(quote.lines.len(), 5);

        let line_materials: Gbp = quote.lines_in(LineCategory::Materials).map(|l| l.total).sum();
        assert_eq!(quote.summary.materials, line_materials);
        assert_eq!(quote.summary.labour, Gbp(660.0));
        assert_eq!(
            result.materials.materials_cost + Gbp(450.0),
            quote.summary.materials
        );

        let s = &quote.summary;
        assert!((s.net.0 - (s.materials.0 + s.labour.0 + s.contingency.0)).abs() < 1e-9);
        assert!((s.total.0 - (s.net.0 + s.vat.0)).abs() < 1e-9);
        assert_eq!(quote.price_list_version, "2025-Q4");
    }

    #[test]
    fn test_optional_lines_omitted() {
        let mut input = repair();
        input.scaffold_weeks = 0.0;
        input.labour_days = 0.0;
        let result = calculate(&input, &DEFAULT_PRICE_LIST).unwrap();
        assert_eq!(result.quote.lines.len(), 3);
        assert_eq!(result.quote.summary.labour, Gbp(0.0));
    }

    #[test]
    fn test_bad_contingency_rejected() {
        let mut input = repair();
        input.contingency_percent = 120.0;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());
    }

    #[test]
    fn test_bad_roofing_input_propagates() {
        let mut input = repair();
        input.roofing.plan_area_m2 = -1.0;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());
    }
}
