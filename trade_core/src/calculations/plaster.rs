//! # Plaster Calculation
//!
//! 25kg bags of gypsum plaster for a wall or ceiling area.
//!
//! | Type | Coat | m² per bag per coat |
//! |------|------|--------------------:|
//! | Multi-finish | 2mm skim | 10.0 |
//! | Board finish | 2mm skim | 11.0 |
//! | Bonding | 8mm undercoat | 3.0 |
//! | Hardwall | 11mm undercoat | 2.75 |

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::quantity::estimate_units;
use crate::errors::{require_positive, require_waste_percent, CalcError, CalcResult};
use crate::pricing::PriceList;
use crate::units::Gbp;

pub const MAX_COATS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlasterType {
    #[default]
    MultiFinish,
    BoardFinish,
    Bonding,
    Hardwall,
}

impl PlasterType {
    pub const ALL: [PlasterType; 4] = [
        PlasterType::MultiFinish,
        PlasterType::BoardFinish,
        PlasterType::Bonding,
        PlasterType::Hardwall,
    ];

    /// Coverage of one 25kg bag for a single coat (m²)
    pub fn coverage_per_bag_m2(&self) -> f64 {
        match self {
            PlasterType::MultiFinish => 10.0,
            PlasterType::BoardFinish => 11.0,
            PlasterType::Bonding => 3.0,
            PlasterType::Hardwall => 2.75,
        }
    }

    pub fn bag_price(&self, prices: &PriceList) -> Gbp {
        match self {
            PlasterType::MultiFinish => prices.plaster.multi_finish_bag,
            PlasterType::BoardFinish => prices.plaster.board_finish_bag,
            PlasterType::Bonding => prices.plaster.bonding_bag,
            PlasterType::Hardwall => prices.plaster.hardwall_bag,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlasterType::MultiFinish => "Multi-finish",
            PlasterType::BoardFinish => "Board finish",
            PlasterType::Bonding => "Bonding",
            PlasterType::Hardwall => "Hardwall",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlasterInput {
    pub label: String,
    pub area_m2: f64,
    #[serde(default)]
    pub plaster_type: PlasterType,
    /// 1 to 3
    pub coats: u32,
    pub waste_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlasterResult {
    pub plaster_type: PlasterType,
    /// Area times coats
    pub coverage_needed_m2: f64,
    pub raw_bags: f64,
    pub bags: u32,
    pub cost: Gbp,
    pub price_list_version: String,
}

pub fn calculate(input: &PlasterInput, prices: &PriceList) -> CalcResult<PlasterResult> {
    if input.coats == 0 || input.coats > MAX_COATS {
        return Err(CalcError::invalid_input(
            "coats",
            input.coats.to_string(),
            format!("Must be between 1 and {}", MAX_COATS),
        ));
    }
    require_positive("area_m2", input.area_m2)?;
    require_waste_percent("waste_percent", input.waste_percent)?;

    let coverage_needed_m2 = input.area_m2 * input.coats as f64;
    let estimate = estimate_units(
        "area_m2",
        coverage_needed_m2,
        input.plaster_type.coverage_per_bag_m2(),
        input.waste_percent,
    )?;
    let cost = (input.plaster_type.bag_price(prices) * estimate.units as f64).round_pence();

    debug!(
        label = %input.label,
        plaster = input.plaster_type.display_name(),
        bags = estimate.units,
        "plaster calculated"
    );

    Ok(PlasterResult {
        plaster_type: input.plaster_type,
        coverage_needed_m2,
        raw_bags: estimate.raw_units,
        bags: estimate.units,
        cost,
        price_list_version: prices.version.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn input(plaster_type: PlasterType, coats: u32) -> PlasterInput {
        PlasterInput {
            label: "Bedroom".to_string(),
            area_m2: 36.0,
            plaster_type,
            coats,
            waste_percent: 10.0,
        }
    }

    #[test]
    fn test_two_coat_skim() {
        // 36 m² * 2 coats / 10 * 1.1 = 7.92 -> 8 bags
        let result = calculate(&input(PlasterType::MultiFinish, 2), &DEFAULT_PRICE_LIST).unwrap();
        assert_eq!(result.bags, 8);
        assert_eq!(result.cost, Gbp(92.0));
    }

    #[test]
    fn test_undercoat_needs_more_bags() {
        let skim = calculate(&input(PlasterType::MultiFinish, 1), &DEFAULT_PRICE_LIST).unwrap();
        let bonding = calculate(&input(PlasterType::Bonding, 1), &DEFAULT_PRICE_LIST).unwrap();
        // 36 / 3 * 1.1 = 13.2 -> 14
        assert_eq!(bonding.bags, 14);
        assert!(bonding.bags > skim.bags);
    }

    #[test]
    fn test_coats_bounds() {
        assert!(calculate(&input(PlasterType::Hardwall, 0), &DEFAULT_PRICE_LIST).is_err());
        assert!(calculate(&input(PlasterType::Hardwall, 4), &DEFAULT_PRICE_LIST).is_err());
        assert!(calculate(&input(PlasterType::Hardwall, 3), &DEFAULT_PRICE_LIST).is_ok());
    }

    #[test]
    fn test_zero_area_rejected() {
        let mut bad = input(PlasterType::BoardFinish, 1);
        bad.area_m2 = 0.0;
        assert!(calculate(&bad, &DEFAULT_PRICE_LIST).is_err());
    }

    #[test]
    fn test_bags_are_ceiling() {
        for plaster_type in PlasterType::ALL {
            let result = calculate(&input(plaster_type, 1), &DEFAULT_PRICE_LIST).unwrap();
            assert_eq!(result.bags as f64, result.raw_bags.ceil());
        }
    }
}
