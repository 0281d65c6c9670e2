//! # Drainage Trench Calculation
//!
//! Excavation, skip hire, pipe lengths and pea gravel bedding for a straight
//! run of underground drainage.
//!
//! ## Assumptions
//!
//! - Excavated ground bulks up by 25% once dug
//! - An 8 yard skip holds 6.1 m³ loose
//! - Pipe comes in 3 m lengths
//! - Pipe sits on a 100mm pea gravel bed with 100mm cover over the crown;
//!   the pipe's own volume is deducted from the surround
//! - Pea gravel weighs 1.6 t/m³ and comes in 850kg bulk bags

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_positive, require_waste_percent, CalcError, CalcResult};
use crate::formulas::quantities::{rectangular_volume, round_up_units, rounded_units, waste_multiplier};
use crate::pricing::PriceList;
use crate::units::{CubicMetres, CubicYards, Gbp, Millimetres, Metres, Tonnes};

pub const BULKING_FACTOR: f64 = 1.25;
pub const SKIP_SIZE_YARDS: f64 = 8.0;
/// Usable loose volume of an 8 yard skip (m³)
pub const SKIP_CAPACITY_M3: f64 = 6.1;
pub const PIPE_LENGTH_M: f64 = 3.0;
pub const BED_DEPTH_M: f64 = 0.1;
pub const COVER_DEPTH_M: f64 = 0.1;
/// Pea gravel (t/m³)
pub const GRAVEL_DENSITY: f64 = 1.6;
pub const GRAVEL_BULK_BAG_T: f64 = 0.85;

fn default_pipe_diameter() -> f64 {
    110.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrainageInput {
    pub label: String,
    pub length_m: f64,
    pub width_m: f64,
    pub depth_m: f64,
    /// Pipe outside diameter (mm); 110 for standard 4" underground
    #[serde(default = "default_pipe_diameter")]
    pub pipe_diameter_mm: f64,
    pub waste_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrainageResult {
    pub excavation: CubicMetres,
    pub bulked_spoil: CubicMetres,
    /// The same spoil in skip-hire units
    pub bulked_spoil_yards: CubicYards,
    pub skips: u32,
    pub pipe_lengths: u32,
    pub bedding: CubicMetres,
    pub gravel: Tonnes,
    pub gravel_bulk_bags: u32,
    pub cost: Gbp,
    pub price_list_version: String,
}

pub fn calculate(input: &DrainageInput, prices: &PriceList) -> CalcResult<DrainageResult> {
    require_positive("length_m", input.length_m)?;
    require_positive("width_m", input.width_m)?;
    require_positive("depth_m", input.depth_m)?;
    require_positive("pipe_diameter_mm", input.pipe_diameter_mm)?;
    require_waste_percent("waste_percent", input.waste_percent)?;

    let pipe_d = Metres::from(Millimetres(input.pipe_diameter_mm)).value();
    let bedding_depth = BED_DEPTH_M + pipe_d + COVER_DEPTH_M;

    if input.width_m <= pipe_d {
        return Err(CalcError::invalid_input(
            "width_m",
            input.width_m.to_string(),
            "Trench must be wider than the pipe",
        ));
    }
    if input.depth_m < bedding_depth {
        return Err(CalcError::invalid_input(
            "depth_m",
            input.depth_m.to_string(),
            format!("Trench must be at least {:.2} m deep for the bed and cover", bedding_depth),
        ));
    }

    let excavation = CubicMetres(rectangular_volume(input.length_m, input.width_m, input.depth_m));
    let bulked_spoil = excavation * BULKING_FACTOR;
    let skips = rounded_units(bulked_spoil.0, SKIP_CAPACITY_M3, 0.0);

    let pipe_lengths = rounded_units(input.length_m, PIPE_LENGTH_M, input.waste_percent);

    let pipe_volume = PI * (pipe_d / 2.0).powi(2) * input.length_m;
    let bedding = CubicMetres(rectangular_volume(input.length_m, input.width_m, bedding_depth) - pipe_volume);
    let gravel = Tonnes(bedding.0 * GRAVEL_DENSITY * waste_multiplier(input.waste_percent));
    let gravel_bulk_bags = round_up_units(gravel.0 / GRAVEL_BULK_BAG_T);

    let p = &prices.drainage;
    let cost = (p.skip_8_yard * skips as f64
        + p.pipe_3m * pipe_lengths as f64
        + p.pea_gravel_bulk_bag * gravel_bulk_bags as f64)
        .round_pence();

    debug!(
        label = %input.label,
        excavation_m3 = excavation.0,
        skips,
        pipe_lengths,
        gravel_bulk_bags,
        "drainage calculated"
    );

    Ok(DrainageResult {
        excavation,
        bulked_spoil,
        bulked_spoil_yards: bulked_spoil.into(),
        skips,
        pipe_lengths,
        bedding,
        gravel,
        gravel_bulk_bags,
        cost,
        price_list_version: prices.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn run() -> DrainageInput {
        DrainageInput {
            label: "Soakaway run".to_string(),
            length_m: 10.0,
            width_m: 0.6,
            depth_m: 0.8,
            pipe_diameter_mm: 110.0,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_ten_metre_run() {
        let result = calculate(&run(), &DEFAULT_PRICE_LIST).unwrap();
        assert!((result.excavation.0 - 4.8).abs() < 1e-9);
        assert!((result.bulked_spoil.0 - 6.0).abs() < 1e-9);
        assert_eq!(result.skips, 1);
        // 10 / 3 * 1.1 = 3.67 -> 4
        assert_eq!(result.pipe_lengths, 4);
        // 10 * 0.6 * 0.31 - pi * 0.055² * 10 = 1.86 - 0.095 = 1.765 m³
        assert!((result.bedding.0 - 1.764967).abs() < 1e-5);
        // 1.765 * 1.6 * 1.1 = 3.106 t -> 4 bags
        assert_eq!(result.gravel_bulk_bags, 4);
        assert_eq!(result.cost, Gbp(300.0 + 4.0 * 28.0 + 4.0 * 65.0));
    }

    #[test]
    fn test_spoil_over_one_skip() {
        let mut input = run();
        input.length_m = 11.0;
        // 5.28 * 1.25 = 6.6 m³
        assert_eq!(calculate(&input, &DEFAULT_PRICE_LIST).unwrap().skips, 2);
    }

    #[test]
    fn test_spoil_in_yards() {
        let result = calculate(&run(), &DEFAULT_PRICE_LIST).unwrap();
        assert!((result.bulked_spoil_yards.0 - 7.848).abs() < 0.001);
    }

    #[test]
    fn test_trench_too_shallow_or_narrow() {
        let mut input = run();
        input.depth_m = 0.25;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());

        let mut input = run();
        input.width_m = 0.1;
        assert!(calculate(&input, &DEFAULT_PRICE_LIST).is_err());
    }
}
