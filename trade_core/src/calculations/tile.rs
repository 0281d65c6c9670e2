//! # Tile Calculation
//!
//! Tiles, adhesive and grout for a wall or floor area.
//!
//! Adhesive consumption depends on the trowel notch, which goes up with the
//! tile size. Banding is on the longest tile edge:
//!
//! | Longest edge | kg/m² |
//! |-------------:|------:|
//! | ≤ 150 mm | 2.5 |
//! | ≤ 300 mm | 3.5 |
//! | ≤ 600 mm | 5.0 |
//! | larger | 7.0 |
//!
//! Grout is the joint volume per square metre times the grout density.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::quantity::estimate_units;
use crate::errors::{require_positive, require_waste_percent, CalcError, CalcResult};
use crate::formulas::quantities::{round_up_units, waste_multiplier};
use crate::pricing::PriceList;
use crate::units::{Gbp, Kilograms};

pub const ADHESIVE_BAG_KG: f64 = 20.0;
pub const GROUT_BAG_KG: f64 = 5.0;
/// Cementitious grout density (kg per litre)
pub const GROUT_DENSITY_KG_PER_L: f64 = 1.6;

/// (max longest edge mm, kg/m²)
const ADHESIVE_BANDS: [(f64, f64); 3] = [(150.0, 2.5), (300.0, 3.5), (600.0, 5.0)];
const LARGE_FORMAT_ADHESIVE: f64 = 7.0;

fn default_thickness() -> f64 {
    8.0
}

fn default_joint() -> f64 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileInput {
    pub label: String,
    pub area_m2: f64,
    pub tile_length_mm: f64,
    pub tile_width_mm: f64,
    #[serde(default = "default_thickness")]
    pub tile_thickness_mm: f64,
    #[serde(default = "default_joint")]
    pub joint_width_mm: f64,
    pub waste_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileResult {
    pub tiles: u32,
    pub adhesive_rate_kg_per_m2: f64,
    pub adhesive: Kilograms,
    pub adhesive_bags: u32,
    pub grout: Kilograms,
    pub grout_bags: u32,
    pub cost: Gbp,
    pub price_list_version: String,
}

/// Adhesive consumption for a tile size (kg/m²).
pub fn adhesive_rate_kg_per_m2(tile_length_mm: f64, tile_width_mm: f64) -> f64 {
    let longest = tile_length_mm.max(tile_width_mm);
    ADHESIVE_BANDS
        .iter()
        .find(|(max_edge, _)| longest <= *max_edge)
        .map(|(_, rate)| *rate)
        .unwrap_or(LARGE_FORMAT_ADHESIVE)
}

/// Grout needed per square metre of tiling (kg/m²).
///
/// With dimensions in mm the joint volume comes out in litres per m².
pub fn grout_kg_per_m2(tile_length_mm: f64, tile_width_mm: f64, joint_width_mm: f64, tile_thickness_mm: f64) -> f64 {
    (tile_length_mm + tile_width_mm) / (tile_length_mm * tile_width_mm)
        * joint_width_mm
        * tile_thickness_mm
        * GROUT_DENSITY_KG_PER_L
}

pub fn calculate(input: &TileInput, prices: &PriceList) -> CalcResult<TileResult> {
    require_positive("area_m2", input.area_m2)?;
    require_positive("tile_length_mm", input.tile_length_mm)?;
    require_positive("tile_width_mm", input.tile_width_mm)?;
    require_positive("tile_thickness_mm", input.tile_thickness_mm)?;
    require_positive("joint_width_mm", input.joint_width_mm)?;
    require_waste_percent("waste_percent", input.waste_percent)?;

    let tile_area_m2 = input.tile_length_mm * input.tile_width_mm / 1_000_000.0;
    if !(tile_area_m2 > 0.0 && tile_area_m2.is_finite()) {
        return Err(CalcError::invalid_input(
            "tile_length_mm",
            format!("{} x {}", input.tile_length_mm, input.tile_width_mm),
            "Tile size (tile_length_mm x tile_width_mm) is out of range",
        ));
    }
    let tiles = estimate_units("area_m2", input.area_m2, tile_area_m2, input.waste_percent)?.units;

    let waste = waste_multiplier(input.waste_percent);
    let adhesive_rate = adhesive_rate_kg_per_m2(input.tile_length_mm, input.tile_width_mm);
    let adhesive = Kilograms(input.area_m2 * adhesive_rate * waste);
    let adhesive_bags = round_up_units(adhesive.0 / ADHESIVE_BAG_KG);

    let grout_rate = grout_kg_per_m2(
        input.tile_length_mm,
        input.tile_width_mm,
        input.joint_width_mm,
        input.tile_thickness_mm,
    );
    let grout = Kilograms(input.area_m2 * grout_rate * waste);
    let grout_bags = round_up_units(grout.0 / GROUT_BAG_KG);

    let cost = (prices.tiling.adhesive_bag_20kg * adhesive_bags as f64
        + prices.tiling.grout_bag_5kg * grout_bags as f64)
        .round_pence();

    debug!(label = %input.label, tiles, adhesive_bags, grout_bags, "tiles calculated");

    Ok(TileResult {
        tiles,
        adhesive_rate_kg_per_m2: adhesive_rate,
        adhesive,
        adhesive_bags,
        grout,
        grout_bags,
        cost,
        price_list_version: prices.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn bathroom() -> TileInput {
        TileInput {
            label: "Bathroom walls".to_string(),
            area_m2: 12.0,
            tile_length_mm: 300.0,
            tile_width_mm: 200.0,
            tile_thickness_mm: 8.0,
            joint_width_mm: 3.0,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_adhesive_bands() {
        assert_eq!(adhesive_rate_kg_per_m2(100.0, 100.0), 2.5);
        assert_eq!(adhesive_rate_kg_per_m2(150.0, 75.0), 2.5);
        assert_eq!(adhesive_rate_kg_per_m2(300.0, 200.0), 3.5);
        assert_eq!(adhesive_rate_kg_per_m2(300.0, 600.0), 5.0);
        assert_eq!(adhesive_rate_kg_per_m2(1200.0, 600.0), 7.0);
    }

    #[test]
    fn test_grout_rate() {
        // 600 / 90000 * 3 * 8 * 1.6 = 0.256
        assert!((grout_kg_per_m2(300.0, 300.0, 3.0, 8.0) - 0.256).abs() < 1e-9);
        // smaller tiles mean more joint
        assert!(grout_kg_per_m2(100.0, 100.0, 3.0, 8.0) > grout_kg_per_m2(600.0, 600.0, 3.0, 8.0));
    }

    #[test]
    fn test_bathroom() {
        let result = calculate(&bathroom(), &DEFAULT_PRICE_LIST).unwrap();
        // 12 / 0.06 * 1.1 = 220
        assert_eq!(result.tiles, 220);
        // 12 * 3.5 * 1.1 = 46.2 kg -> 3 bags
        assert!((result.adhesive.0 - 46.2).abs() < 1e-9);
        assert_eq!(result.adhesive_bags, 3);
        // 500/60000 * 24 * 1.6 = 0.32 kg/m²; 12 * 0.32 * 1.1 = 4.224 kg -> 1 bag
        assert_eq!(result.grout_bags, 1);
        assert_eq!(result.cost, Gbp(66.0));
    }

    #[test]
    fn test_validation() {
        let mut input = bathroom();
        input.tile_width_mm = 0.0;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());

        let mut input = bathroom();
        input.joint_width_mm = -2.0;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());
    }

    #[test]
    fn test_vanishing_tile_reported_on_tile_size() {
        let mut input = bathroom();
        input.tile_length_mm = 1e-160;
        input.tile_width_mm = 1e-160;
        match calculate(&input, &DEFAULT_PRICE_LIST).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "tile_length_mm"),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_defaults_from_json() {
        let json = r#"{"label":"Floor","area_m2":5.0,"tile_length_mm":600.0,"tile_width_mm":600.0,"waste_percent":5.0}"#;
        let input: TileInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.tile_thickness_mm, 8.0);
        assert_eq!(input.joint_width_mm, 3.0);
    }
}
