//! # Concrete Calculation
//!
//! Volume of a rectangular pour and the materials to fill it three ways:
//! site-mixed from cement, sand and ballast; pre-mixed 20kg bags; or
//! ready-mix by the cubic metre.
//!
//! ## Mix Ratios (cement : sand : ballast)
//!
//! | Application | Ratio |
//! |-------------|-------|
//! | Foundation | 1 : 3 : 6 |
//! | Slab | 1 : 2 : 4 |
//! | Path | 1 : 1.5 : 3 |
//! | Post hole | 1 : 2 : 4 |
//!
//! Dry materials shrink when wetted, so the dry volume is taken as 1.54
//! times the wet volume before splitting by ratio.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::quantity::estimate_units;
use crate::errors::{require_positive, require_waste_percent, CalcResult};
use crate::formulas::quantities::{rectangular_volume, round_up_units, waste_multiplier};
use crate::pricing::PriceList;
use crate::units::{CubicMetres, Gbp, Kilograms};

/// Dry to wet volume factor
pub const DRY_VOLUME_FACTOR: f64 = 1.54;
/// Loose bulk densities (kg/m³)
pub const CEMENT_DENSITY: f64 = 1440.0;
pub const SAND_DENSITY: f64 = 1600.0;
pub const BALLAST_DENSITY: f64 = 1500.0;
/// Cement bag (kg)
pub const CEMENT_BAG_KG: f64 = 25.0;
/// Builders' bulk bag of sand or ballast (kg)
pub const BULK_BAG_KG: f64 = 850.0;
/// Yield of one 20kg pre-mixed bag (m³)
pub const PREMIXED_BAG_M3: f64 = 0.01;
/// Ready-mix is ordered in quarter cubes
pub const READY_MIX_INCREMENT_M3: f64 = 0.25;

/// What the concrete is for. Sets the mix ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConcreteApplication {
    Foundation,
    #[default]
    Slab,
    Path,
    PostHole,
}

impl ConcreteApplication {
    /// (cement, sand, ballast) parts
    pub fn mix_ratio(&self) -> (f64, f64, f64) {
        match self {
            ConcreteApplication::Foundation => (1.0, 3.0, 6.0),
            ConcreteApplication::Slab => (1.0, 2.0, 4.0),
            ConcreteApplication::Path => (1.0, 1.5, 3.0),
            ConcreteApplication::PostHole => (1.0, 2.0, 4.0),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ConcreteApplication::Foundation => "Foundation",
            ConcreteApplication::Slab => "Slab",
            ConcreteApplication::Path => "Path",
            ConcreteApplication::PostHole => "Post hole",
        }
    }
}

/// Input for a concrete estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConcreteInput {
    pub label: String,
    pub length_m: f64,
    pub width_m: f64,
    pub depth_m: f64,
    #[serde(default)]
    pub application: ConcreteApplication,
    pub waste_percent: f64,
}

/// Result of a concrete estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcreteResult {
    /// Net volume of the pour
    pub volume: CubicMetres,
    /// Volume including waste
    pub volume_with_waste: CubicMetres,
    pub mix_ratio: (f64, f64, f64),
    pub cement: Kilograms,
    pub cement_bags: u32,
    pub sand: Kilograms,
    pub sand_bulk_bags: u32,
    pub ballast: Kilograms,
    pub ballast_bulk_bags: u32,
    pub premixed_bags: u32,
    pub ready_mix_order: CubicMetres,
    pub site_mix_cost: Gbp,
    pub premixed_cost: Gbp,
    pub ready_mix_cost: Gbp,
    pub price_list_version: String,
}

impl ConcreteResult {
    /// Cheapest of the three ways to get the concrete
    pub fn cheapest_cost(&self) -> Gbp {
        [self.site_mix_cost, self.premixed_cost, self.ready_mix_cost]
            .into_iter()
            .fold(self.site_mix_cost, |best, c| if c.0 < best.0 { c } else { best })
    }
}

/// Run a concrete estimate.
pub fn calculate(input: &ConcreteInput, prices: &PriceList) -> CalcResult<ConcreteResult> {
    require_positive("length_m", input.length_m)?;
    require_positive("width_m", input.width_m)?;
    require_positive("depth_m", input.depth_m)?;
    require_waste_percent("waste_percent", input.waste_percent)?;

    let volume = CubicMetres(rectangular_volume(input.length_m, input.width_m, input.depth_m));
    let volume_with_waste = volume * waste_multiplier(input.waste_percent);

    let (c, s, b) = input.application.mix_ratio();
    let parts = c + s + b;
    let dry = volume_with_waste.0 * DRY_VOLUME_FACTOR;

    let cement = Kilograms(dry * c / parts * CEMENT_DENSITY);
    let sand = Kilograms(dry * s / parts * SAND_DENSITY);
    let ballast = Kilograms(dry * b / parts * BALLAST_DENSITY);

    let cement_bags = round_up_units(cement.0 / CEMENT_BAG_KG);
    let sand_bulk_bags = round_up_units(sand.0 / BULK_BAG_KG);
    let ballast_bulk_bags = round_up_units(ballast.0 / BULK_BAG_KG);

    let premixed_bags = estimate_units("volume", volume.0, PREMIXED_BAG_M3, input.waste_percent)?.units;
    let ready_mix_order =
        CubicMetres(round_up_units(volume_with_waste.0 / READY_MIX_INCREMENT_M3) as f64 * READY_MIX_INCREMENT_M3);

    let p = &prices.concrete;
    let site_mix_cost = (p.cement_bag_25kg * cement_bags as f64
        + p.sand_bulk_bag * sand_bulk_bags as f64
        + p.ballast_bulk_bag * ballast_bulk_bags as f64)
        .round_pence();
    let premixed_cost = (p.premixed_bag_20kg * premixed_bags as f64).round_pence();
    let ready_mix_cost = (p.ready_mix_per_m3 * ready_mix_order.0).round_pence();

    debug!(
        label = %input.label,
        application = input.application.display_name(),
        volume_m3 = volume.0,
        cement_bags,
        premixed_bags,
        "concrete calculated"
    );

    Ok(ConcreteResult {
        volume,
        volume_with_waste,
        mix_ratio: (c, s, b),
        cement,
        cement_bags,
        sand,
        sand_bulk_bags,
        ballast,
        ballast_bulk_bags,
        premixed_bags,
        ready_mix_order,
        site_mix_cost,
        premixed_cost,
        ready_mix_cost,
        price_list_version: prices.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn slab() -> ConcreteInput {
        ConcreteInput {
            label: "Shed base".to_string(),
            length_m: 3.0,
            width_m: 3.0,
            depth_m: 0.1,
            application: ConcreteApplication::Slab,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_shed_base() {
        let result = calculate(&slab(), &DEFAULT_PRICE_LIST).unwrap();
        assert!((result.volume.0 - 0.9).abs() < 1e-9);
        assert!((result.volume_with_waste.0 - 0.99).abs() < 1e-9);
        // dry 1.5246 m³: cement 313.6 kg, sand 696.9 kg, ballast 1306.8 kg
        assert_eq!(result.cement_bags, 13);
        assert_eq!(result.sand_bulk_bags, 1);
        assert_eq!(result.ballast_bulk_bags, 2);
        assert_eq!(result.premixed_bags, 99);
        assert!((result.ready_mix_order.0 - 1.0).abs() < 1e-9);
        assert_eq!(result.site_mix_cost, Gbp(262.5));
        assert_eq!(result.ready_mix_cost, Gbp(130.0));
        assert_eq!(result.cheapest_cost(), Gbp(130.0));
        assert_eq!(result.price_list_version, "2025-Q4");
    }

    #[test]
    fn test_leaner_mix_uses_less_cement() {
        let mut input = slab();
        let slab_cement = calculate(&input, &DEFAULT_PRICE_LIST).unwrap().cement;
        input.application = ConcreteApplication::Foundation;
        let foundation_cement = calculate(&input, &DEFAULT_PRICE_LIST).unwrap().cement;
        assert!(foundation_cement.0 < slab_cement.0);
    }

    #[test]
    fn test_counts_non_decreasing_in_waste() {
        let mut input = slab();
        let mut last = 0;
        for waste in 0..=50 {
            input.waste_percent = waste as f64;
            let bags = calculate(&input, &DEFAULT_PRICE_LIST).unwrap().premixed_bags;
            assert!(bags >= last);
            last = bags;
        }
    }

    #[test]
    fn test_validation() {
        let mut input = slab();
        input.depth_m = 0.0;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());

        let mut input = slab();
        input.waste_percent = 101.0;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());
    }

    #[test]
    fn test_custom_prices_flow_through() {
        let mut prices = DEFAULT_PRICE_LIST.clone();
        prices.version = "test".to_string();
        prices.concrete.ready_mix_per_m3 = Gbp(150.0);
        let result = calculate(&slab(), &prices).unwrap();
        assert_eq!(result.ready_mix_cost, Gbp(150.0));
        assert_eq!(result.price_list_version, "test");
    }
}
