//! # Joinery Calculations
//!
//! First-fix stud partitions and second-fix skirting.
//!
//! ## Stud Wall
//!
//! CLS studs at fixed centres between a sole plate and a head plate, with
//! rows of noggins, boarded one or both sides with 2400 × 1200 plasterboard.
//! All timber is cut from 4.8 m stock.
//!
//! ## Skirting
//!
//! Room perimeter less door openings, in whole stock lengths.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_non_negative, require_positive, require_waste_percent, CalcError, CalcResult};
use crate::formulas::quantities::{members_at_centres, round_up_units, rounded_units, waste_multiplier};
use crate::pricing::PriceList;
use crate::units::{Gbp, Metres, Millimetres, SquareMetres};

/// CLS stock length (m)
pub const TIMBER_STOCK_M: f64 = 4.8;
/// Sole and head plate depth (m), 38mm each
pub const PLATE_DEPTH_M: f64 = 0.038;
/// 2400 × 1200 sheet
pub const PLASTERBOARD_SHEET_M2: f64 = 2.88;
pub const DEFAULT_DOOR_WIDTH_M: f64 = 0.9;
pub const DEFAULT_SKIRTING_STOCK_M: f64 = 4.2;

fn default_centres() -> f64 {
    600.0
}

fn default_noggin_rows() -> u32 {
    1
}

fn default_sides() -> u32 {
    2
}

fn default_door_width() -> f64 {
    DEFAULT_DOOR_WIDTH_M
}

fn default_skirting_stock() -> f64 {
    DEFAULT_SKIRTING_STOCK_M
}

// ============================================================================
// Stud Wall
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudWallInput {
    pub label: String,
    pub length_m: f64,
    pub height_m: f64,
    /// Stud centres (mm), usually 400 or 600
    #[serde(default = "default_centres")]
    pub centres_mm: f64,
    #[serde(default = "default_noggin_rows")]
    pub noggin_rows: u32,
    /// 1 or 2
    #[serde(default = "default_sides")]
    pub boarded_sides: u32,
    pub waste_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudWallResult {
    pub studs: u32,
    pub stud_length: Metres,
    /// Sole plus head plate
    pub plate_run: Metres,
    pub noggin_run: Metres,
    pub total_timber: Metres,
    pub timber_lengths: u32,
    pub board_area: SquareMetres,
    pub plasterboard_sheets: u32,
    pub timber_cost: Gbp,
    pub board_cost: Gbp,
    pub total_cost: Gbp,
    pub price_list_version: String,
}

pub fn calculate_stud_wall(input: &StudWallInput, prices: &PriceList) -> CalcResult<StudWallResult> {
    require_positive("length_m", input.length_m)?;
    require_positive("height_m", input.height_m)?;
    require_positive("centres_mm", input.centres_mm)?;
    require_waste_percent("waste_percent", input.waste_percent)?;
    if !(1..=2).contains(&input.boarded_sides) {
        return Err(CalcError::invalid_input(
            "boarded_sides",
            input.boarded_sides.to_string(),
            "Must be 1 or 2",
        ));
    }

    let stud_length = input.height_m - 2.0 * PLATE_DEPTH_M;
    if stud_length <= 0.0 || stud_length > TIMBER_STOCK_M {
        return Err(CalcError::invalid_input(
            "height_m",
            input.height_m.to_string(),
            format!("Studs must fit in {} m stock", TIMBER_STOCK_M),
        ));
    }

    let centres: Metres = Millimetres(input.centres_mm).into();
    let studs = members_at_centres(input.length_m, centres.value());
    let plate_run = Metres(2.0 * input.length_m);
    let noggin_run = Metres(input.noggin_rows as f64 * input.length_m);
    let total_timber = Metres(studs as f64 * stud_length) + plate_run + noggin_run;

    // Studs are cut whole from stock; plates and noggins are joined
    let studs_per_length = (TIMBER_STOCK_M / stud_length).floor().max(1.0);
    let stud_stock = round_up_units(studs as f64 / studs_per_length);
    let run_stock = round_up_units((plate_run + noggin_run).value() / TIMBER_STOCK_M);
    let timber_lengths = round_up_units((stud_stock + run_stock) as f64 * waste_multiplier(input.waste_percent));

    let board_area = Metres(input.length_m).by(Metres(input.height_m)) * input.boarded_sides as f64;
    let plasterboard_sheets = rounded_units(board_area.0, PLASTERBOARD_SHEET_M2, input.waste_percent);

    let timber_cost = (prices.joinery.cls_4_8m * timber_lengths as f64).round_pence();
    let board_cost = (prices.joinery.plasterboard_sheet * plasterboard_sheets as f64).round_pence();

    debug!(
        label = %input.label,
        studs,
        timber_lengths,
        plasterboard_sheets,
        "stud wall calculated"
    );

    Ok(StudWallResult {
        studs,
        stud_length: Metres(stud_length),
        plate_run,
        noggin_run,
        total_timber,
        timber_lengths,
        board_area,
        plasterboard_sheets,
        timber_cost,
        board_cost,
        total_cost: timber_cost + board_cost,
        price_list_version: prices.version.clone(),
    })
}

// ============================================================================
// Skirting
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkirtingInput {
    pub label: String,
    pub perimeter_m: f64,
    #[serde(default)]
    pub doors: u32,
    #[serde(default = "default_door_width")]
    pub door_width_m: f64,
    #[serde(default = "default_skirting_stock")]
    pub stock_length_m: f64,
    pub waste_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkirtingResult {
    pub net_run: Metres,
    pub lengths: u32,
    pub cost: Gbp,
    pub price_list_version: String,
}

pub fn calculate_skirting(input: &SkirtingInput, prices: &PriceList) -> CalcResult<SkirtingResult> {
    require_positive("perimeter_m", input.perimeter_m)?;
    require_non_negative("door_width_m", input.door_width_m)?;
    require_positive("stock_length_m", input.stock_length_m)?;
    require_waste_percent("waste_percent", input.waste_percent)?;

    let net_run = input.perimeter_m - input.doors as f64 * input.door_width_m;
    if net_run < 0.0 {
        return Err(CalcError::invalid_input(
            "doors",
            input.doors.to_string(),
            "Door openings exceed the room perimeter",
        ));
    }

    let lengths = rounded_units(net_run, input.stock_length_m, input.waste_percent);
    let cost = (prices.joinery.skirting_length * lengths as f64).round_pence();

    debug!(label = %input.label, net_run_m = net_run, lengths, "skirting calculated");

    Ok(SkirtingResult {
        net_run: Metres(net_run),
        lengths,
        cost,
        price_list_version: prices.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn partition() -> StudWallInput {
        StudWallInput {
            label: "Landing partition".to_string(),
            length_m: 3.6,
            height_m: 2.4,
            centres_mm: 600.0,
            noggin_rows: 1,
            boarded_sides: 2,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_partition() {
        let result = calculate_stud_wall(&partition(), &DEFAULT_PRICE_LIST).unwrap();
        assert_eq!(result.studs, 7);
        assert!((result.stud_length.0 - 2.324).abs() < 1e-9);
        // 2 studs per length -> 4 lengths; 7.2 + 3.6 = 10.8 m of runs -> 3 lengths; 7 * 1.1 = 7.7 -> 8
        assert_eq!(result.timber_lengths, 8);
        // 3.6 * 2.4 * 2 = 17.28 m²; 17.28 / 2.88 * 1.1 = 6.6 -> 7
        assert!((result.board_area.0 - 17.28).abs() < 1e-9);
        assert_eq!(result.plasterboard_sheets, 7);
        assert_eq!(result.total_cost, Gbp(8.0 * 9.0 + 7.0 * 11.0));
    }

    #[test]
    fn test_closer_centres_more_studs() {
        let mut input = partition();
        input.centres_mm = 400.0;
        assert_eq!(calculate_stud_wall(&input, &DEFAULT_PRICE_LIST).unwrap().studs, 10);
    }

    #[test]
    fn test_stud_wall_validation() {
        let mut input = partition();
        input.boarded_sides = 3;
        assert!(calculate_stud_wall(&input, &DEFAULT_PRICE_LIST).is_err());

        let mut input = partition();
        input.height_m = 5.5;
        assert!(calculate_stud_wall(&input, &DEFAULT_PRICE_LIST).is_err());
    }

    #[test]
    fn test_skirting() {
        let input = SkirtingInput {
            label: "Lounge".to_string(),
            perimeter_m: 18.0,
            doors: 2,
            door_width_m: 0.9,
            stock_length_m: 4.2,
            waste_percent: 10.0,
        };
        let result = calculate_skirting(&input, &DEFAULT_PRICE_LIST).unwrap();
        // 16.2 / 4.2 * 1.1 = 4.24 -> 5
        assert!((result.net_run.0 - 16.2).abs() < 1e-9);
        assert_eq!(result.lengths, 5);
        assert_eq!(result.cost, Gbp(70.0));
    }

    #[test]
    fn test_too_many_doors() {
        let input = SkirtingInput {
            label: "Cupboard".to_string(),
            perimeter_m: 1.5,
            doors: 2,
            door_width_m: 0.9,
            stock_length_m: 4.2,
            waste_percent: 0.0,
        };
        assert!(calculate_skirting(&input, &DEFAULT_PRICE_LIST).is_err());
    }
}
