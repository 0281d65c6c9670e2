//! # Roof Covering Calculation
//!
//! Tiles, battens and underlay for a single pitched plane, worked from the
//! plan area and the pitch.
//!
//! ## Tile Types
//!
//! | Type | per m² | Gauge | Min pitch |
//! |------|-------:|------:|----------:|
//! | Plain clay | 60 | 100mm | 35° |
//! | Concrete interlocking | 10 | 345mm | 17.5° |
//! | Natural slate | 20 | 200mm | 20° |
//! | Fibre cement slate | 13 | 250mm | 20° |
//!
//! Laying below the minimum pitch is reported, not rejected; some products
//! have low-pitch systems and the roofer decides.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{require_positive, require_waste_percent, CalcError, CalcResult};
use crate::formulas::quantities::{pitched_area, round_up_units, rounded_units, waste_multiplier};
use crate::pricing::PriceList;
use crate::units::{Gbp, Metres, SquareMetres};

/// Stock batten length (m)
pub const BATTEN_LENGTH_M: f64 = 4.8;
/// Coverage of one roll of breathable underlay, laps allowed for (m²)
pub const UNDERLAY_ROLL_M2: f64 = 45.0;
/// Steepest pitch accepted
pub const MAX_PITCH_DEG: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoofTile {
    PlainClay,
    #[default]
    ConcreteInterlocking,
    NaturalSlate,
    FibreCementSlate,
}

impl RoofTile {
    pub const ALL: [RoofTile; 4] = [
        RoofTile::PlainClay,
        RoofTile::ConcreteInterlocking,
        RoofTile::NaturalSlate,
        RoofTile::FibreCementSlate,
    ];

    pub fn tiles_per_m2(&self) -> f64 {
        match self {
            RoofTile::PlainClay => 60.0,
            RoofTile::ConcreteInterlocking => 10.0,
            RoofTile::NaturalSlate => 20.0,
            RoofTile::FibreCementSlate => 13.0,
        }
    }

    /// Batten gauge (m)
    pub fn gauge_m(&self) -> f64 {
        match self {
            RoofTile::PlainClay => 0.100,
            RoofTile::ConcreteInterlocking => 0.345,
            RoofTile::NaturalSlate => 0.200,
            RoofTile::FibreCementSlate => 0.250,
        }
    }

    pub fn min_pitch_deg(&self) -> f64 {
        match self {
            RoofTile::PlainClay => 35.0,
            RoofTile::ConcreteInterlocking => 17.5,
            RoofTile::NaturalSlate => 20.0,
            RoofTile::FibreCementSlate => 20.0,
        }
    }

    pub fn unit_price(&self, prices: &PriceList) -> Gbp {
        match self {
            RoofTile::PlainClay => prices.roofing.plain_clay_tile,
            RoofTile::ConcreteInterlocking => prices.roofing.concrete_interlocking_tile,
            RoofTile::NaturalSlate => prices.roofing.natural_slate,
            RoofTile::FibreCementSlate => prices.roofing.fibre_cement_slate,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RoofTile::PlainClay => "Plain clay tile",
            RoofTile::ConcreteInterlocking => "Concrete interlocking tile",
            RoofTile::NaturalSlate => "Natural slate",
            RoofTile::FibreCementSlate => "Fibre cement slate",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoofingInput {
    pub label: String,
    /// Plan (footprint) area of the plane
    pub plan_area_m2: f64,
    pub pitch_deg: f64,
    #[serde(default)]
    pub tile: RoofTile,
    pub waste_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoofingResult {
    pub tile: RoofTile,
    pub slope_area: SquareMetres,
    pub tiles: u32,
    pub batten_run: Metres,
    pub batten_lengths: u32,
    pub underlay_rolls: u32,
    pub below_minimum_pitch: bool,
    pub tiles_cost: Gbp,
    pub battens_cost: Gbp,
    pub underlay_cost: Gbp,
    pub materials_cost: Gbp,
    pub price_list_version: String,
}

pub fn calculate(input: &RoofingInput, prices: &PriceList) -> CalcResult<RoofingResult> {
    require_positive("plan_area_m2", input.plan_area_m2)?;
    require_positive("pitch_deg", input.pitch_deg)?;
    if input.pitch_deg > MAX_PITCH_DEG {
        return Err(CalcError::invalid_input(
            "pitch_deg",
            input.pitch_deg.to_string(),
            format!("Pitch cannot exceed {}°", MAX_PITCH_DEG),
        ));
    }
    require_waste_percent("waste_percent", input.waste_percent)?;

    let tile = input.tile;
    let slope_area = SquareMetres(pitched_area(input.plan_area_m2, input.pitch_deg));

    let tiles = rounded_units(slope_area.0 * tile.tiles_per_m2(), 1.0, input.waste_percent);

    let batten_run = Metres(slope_area.0 / tile.gauge_m() * waste_multiplier(input.waste_percent));
    let batten_lengths = round_up_units(batten_run.0 / BATTEN_LENGTH_M);

    let underlay_rolls = rounded_units(slope_area.0, UNDERLAY_ROLL_M2, input.waste_percent);

    let below_minimum_pitch = input.pitch_deg < tile.min_pitch_deg();
    if below_minimum_pitch {
        warn!(
            pitch_deg = input.pitch_deg,
            min_pitch_deg = tile.min_pitch_deg(),
            tile = tile.display_name(),
            "pitch below manufacturer minimum"
        );
    }

    let tiles_cost = (tile.unit_price(prices) * tiles as f64).round_pence();
    let battens_cost = (prices.roofing.batten_4_8m * batten_lengths as f64).round_pence();
    let underlay_cost = (prices.roofing.underlay_roll * underlay_rolls as f64).round_pence();
    let materials_cost = tiles_cost + battens_cost + underlay_cost;

    debug!(
        label = %input.label,
        slope_area_m2 = slope_area.0,
        tiles,
        batten_lengths,
        underlay_rolls,
        "roofing calculated"
    );

    Ok(RoofingResult {
        tile,
        slope_area,
        tiles,
        batten_run,
        batten_lengths,
        underlay_rolls,
        below_minimum_pitch,
        tiles_cost,
        battens_cost,
        underlay_cost,
        materials_cost,
        price_list_version: prices.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn plane(tile: RoofTile, pitch_deg: f64) -> RoofingInput {
        RoofingInput {
            label: "Rear slope".to_string(),
            plan_area_m2: 30.0,
            pitch_deg,
            tile,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_interlocking_at_thirty_degrees() {
        let result = calculate(&plane(RoofTile::ConcreteInterlocking, 30.0), &DEFAULT_PRICE_LIST).unwrap();
        // 30 / cos 30° = 34.64 m²
        assert!((result.slope_area.0 - 34.641).abs() < 0.001);
        // 346.41 * 1.1 = 381.05 -> 382
        assert_eq!(result.tiles, 382);
        // 34.64 / 0.345 * 1.1 = 110.45 m -> 24 lengths
        assert_eq!(result.batten_lengths, 24);
        // 34.64 / 45 * 1.1 = 0.85 -> 1
        assert_eq!(result.underlay_rolls, 1);
        assert!(!result.below_minimum_pitch);
        assert_eq!(
            result.materials_cost,
            result.tiles_cost + result.battens_cost + result.underlay_cost
        );
    }

    #[test]
    fn test_plain_tiles_below_minimum_pitch_flagged() {
        let result = calculate(&plane(RoofTile::PlainClay, 30.0), &DEFAULT_PRICE_LIST).unwrap();
        assert!(result.below_minimum_pitch);
        let result = calculate(&plane(RoofTile::PlainClay, 40.0), &DEFAULT_PRICE_LIST).unwrap();
        assert!(!result.below_minimum_pitch);
    }

    #[test]
    fn test_steeper_roof_needs_more() {
        let shallow = calculate(&plane(RoofTile::NaturalSlate, 22.5), &DEFAULT_PRICE_LIST).unwrap();
        let steep = calculate(&plane(RoofTile::NaturalSlate, 45.0), &DEFAULT_PRICE_LIST).unwrap();
        assert!(steep.slope_area.0 > shallow.slope_area.0);
        assert!(steep.tiles > shallow.tiles);
    }

    #[test]
    fn test_pitch_validation() {
        assert!(calculate(&plane(RoofTile::PlainClay, 0.0), &DEFAULT_PRICE_LIST).is_err());
        assert!(calculate(&plane(RoofTile::PlainClay, 80.0), &DEFAULT_PRICE_LIST).is_err());
    }
}
