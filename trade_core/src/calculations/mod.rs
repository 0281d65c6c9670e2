//! # Trade Calculations
//!
//! This module contains every calculator. Each one follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Calculators that produce costs also take a [`PriceList`], so the same
//! inputs always price the same way against the same list.
//!
//! ## Available Calculations
//!
//! - [`bsp_thread`] - BSP thread identification by diameter or TPI
//! - [`voltage_drop`] - Voltage drop against BS 7671 limits
//! - [`cable_sizing`] - Conductor size by current and run length
//! - [`quantity`] - Generic waste-adjusted unit count
//! - [`concrete`] - Site-mix, pre-mix and ready-mix concrete
//! - [`plaster`] - Plaster bags by type and coats
//! - [`tile`] - Tiles, adhesive and grout
//! - [`drainage`] - Trench spoil, skips, pipe and bedding
//! - [`roofing`] - Tiles, battens and underlay for a pitched plane
//! - [`roofing_quote`] - Priced roofing repair quote
//! - [`joinery`] - Stud partitions and skirting
//! - [`cis_tax`] - CIS deductions, gross to net and net to gross

pub mod bsp_thread;
pub mod cable_sizing;
pub mod cis_tax;
pub mod concrete;
pub mod drainage;
pub mod joinery;
pub mod plaster;
pub mod quantity;
pub mod roofing;
pub mod roofing_quote;
pub mod tile;
pub mod voltage_drop;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::pricing::PriceList;

// Re-export commonly used types
pub use bsp_thread::{BspLookupInput, BspLookupResult, BspQuery};
pub use cable_sizing::{CableSizingInput, CableSizingResult};
pub use cis_tax::{CisGrossToNetInput, CisGrossToNetResult, CisNetToGrossInput, CisNetToGrossResult, CisRate};
pub use concrete::{ConcreteApplication, ConcreteInput, ConcreteResult};
pub use drainage::{DrainageInput, DrainageResult};
pub use joinery::{SkirtingInput, SkirtingResult, StudWallInput, StudWallResult};
pub use plaster::{PlasterInput, PlasterResult, PlasterType};
pub use quantity::{QuantityInput, QuantityResult};
pub use roofing::{RoofTile, RoofingInput, RoofingResult};
pub use roofing_quote::{RoofRepairQuoteInput, RoofRepairQuoteResult};
pub use tile::{TileInput, TileResult};
pub use voltage_drop::{CircuitClass, Phase, VoltageDropInput, VoltageDropResult};

/// Every calculator the crate offers.
///
/// Serializes as the kebab-case `calculatorType` used in saved jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CalculatorKind {
    BspLookup,
    VoltageDrop,
    CableSizing,
    Quantity,
    Concrete,
    Plaster,
    Tile,
    Drainage,
    Roofing,
    RoofRepairQuote,
    StudWall,
    Skirting,
    CisGrossToNet,
    CisNetToGross,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 14] = [
        CalculatorKind::BspLookup,
        CalculatorKind::VoltageDrop,
        CalculatorKind::CableSizing,
        CalculatorKind::Quantity,
        CalculatorKind::Concrete,
        CalculatorKind::Plaster,
        CalculatorKind::Tile,
        CalculatorKind::Drainage,
        CalculatorKind::Roofing,
        CalculatorKind::RoofRepairQuote,
        CalculatorKind::StudWall,
        CalculatorKind::Skirting,
        CalculatorKind::CisGrossToNet,
        CalculatorKind::CisNetToGross,
    ];

    /// Wire name, as stored in `calculatorType`
    pub fn as_str(&self) -> &'static str {
        match self {
            CalculatorKind::BspLookup => "bsp-lookup",
            CalculatorKind::VoltageDrop => "voltage-drop",
            CalculatorKind::CableSizing => "cable-sizing",
            CalculatorKind::Quantity => "quantity",
            CalculatorKind::Concrete => "concrete",
            CalculatorKind::Plaster => "plaster",
            CalculatorKind::Tile => "tile",
            CalculatorKind::Drainage => "drainage",
            CalculatorKind::Roofing => "roofing",
            CalculatorKind::RoofRepairQuote => "roof-repair-quote",
            CalculatorKind::StudWall => "stud-wall",
            CalculatorKind::Skirting => "skirting",
            CalculatorKind::CisGrossToNet => "cis-gross-to-net",
            CalculatorKind::CisNetToGross => "cis-net-to-gross",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CalculatorKind::BspLookup => "BSP Thread Lookup",
            CalculatorKind::VoltageDrop => "Voltage Drop",
            CalculatorKind::CableSizing => "Cable Sizing",
            CalculatorKind::Quantity => "Quantity",
            CalculatorKind::Concrete => "Concrete",
            CalculatorKind::Plaster => "Plaster",
            CalculatorKind::Tile => "Tiling",
            CalculatorKind::Drainage => "Drainage",
            CalculatorKind::Roofing => "Roofing",
            CalculatorKind::RoofRepairQuote => "Roof Repair Quote",
            CalculatorKind::StudWall => "Stud Wall",
            CalculatorKind::Skirting => "Skirting",
            CalculatorKind::CisGrossToNet => "CIS Gross to Net",
            CalculatorKind::CisNetToGross => "CIS Net to Gross",
        }
    }

    /// Parse a wire name
    pub fn from_name(name: &str) -> CalcResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == name)
            .ok_or_else(|| CalcError::unknown_entry("calculator", name))
    }
}

impl std::fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Enum wrapper for all calculation inputs.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    BspLookup(BspLookupInput),
    VoltageDrop(VoltageDropInput),
    CableSizing(CableSizingInput),
    Quantity(QuantityInput),
    Concrete(ConcreteInput),
    Plaster(PlasterInput),
    Tile(TileInput),
    Drainage(DrainageInput),
    Roofing(RoofingInput),
    RoofRepairQuote(RoofRepairQuoteInput),
    StudWall(StudWallInput),
    Skirting(SkirtingInput),
    CisGrossToNet(CisGrossToNetInput),
    CisNetToGross(CisNetToGrossInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::BspLookup(i) => &i.label,
            CalculationItem::VoltageDrop(i) => &i.label,
            CalculationItem::CableSizing(i) => &i.label,
            CalculationItem::Quantity(i) => &i.label,
            CalculationItem::Concrete(i) => &i.label,
            CalculationItem::Plaster(i) => &i.label,
            CalculationItem::Tile(i) => &i.label,
            CalculationItem::Drainage(i) => &i.label,
            CalculationItem::Roofing(i) => &i.label,
            CalculationItem::RoofRepairQuote(i) => &i.label,
            CalculationItem::StudWall(i) => &i.label,
            CalculationItem::Skirting(i) => &i.label,
            CalculationItem::CisGrossToNet(i) => &i.label,
            CalculationItem::CisNetToGross(i) => &i.label,
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationItem::BspLookup(_) => CalculatorKind::BspLookup,
            CalculationItem::VoltageDrop(_) => CalculatorKind::VoltageDrop,
            CalculationItem::CableSizing(_) => CalculatorKind::CableSizing,
            CalculationItem::Quantity(_) => CalculatorKind::Quantity,
            CalculationItem::Concrete(_) => CalculatorKind::Concrete,
            CalculationItem::Plaster(_) => CalculatorKind::Plaster,
            CalculationItem::Tile(_) => CalculatorKind::Tile,
            CalculationItem::Drainage(_) => CalculatorKind::Drainage,
            CalculationItem::Roofing(_) => CalculatorKind::Roofing,
            CalculationItem::RoofRepairQuote(_) => CalculatorKind::RoofRepairQuote,
            CalculationItem::StudWall(_) => CalculatorKind::StudWall,
            CalculationItem::Skirting(_) => CalculatorKind::Skirting,
            CalculationItem::CisGrossToNet(_) => CalculatorKind::CisGrossToNet,
            CalculationItem::CisNetToGross(_) => CalculatorKind::CisNetToGross,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        self.kind().as_str()
    }

    /// Run whichever calculator this item holds.
    pub fn calculate(&self, prices: &PriceList) -> CalcResult<CalculationOutcome> {
        Ok(match self {
            CalculationItem::BspLookup(i) => CalculationOutcome::BspLookup(bsp_thread::calculate(i)?),
            CalculationItem::VoltageDrop(i) => CalculationOutcome::VoltageDrop(voltage_drop::calculate(i)?),
            CalculationItem::CableSizing(i) => CalculationOutcome::CableSizing(cable_sizing::calculate(i)?),
            CalculationItem::Quantity(i) => CalculationOutcome::Quantity(quantity::calculate(i)?),
            CalculationItem::Concrete(i) => CalculationOutcome::Concrete(concrete::calculate(i, prices)?),
            CalculationItem::Plaster(i) => CalculationOutcome::Plaster(plaster::calculate(i, prices)?),
            CalculationItem::Tile(i) => CalculationOutcome::Tile(tile::calculate(i, prices)?),
            CalculationItem::Drainage(i) => CalculationOutcome::Drainage(drainage::calculate(i, prices)?),
            CalculationItem::Roofing(i) => CalculationOutcome::Roofing(roofing::calculate(i, prices)?),
            CalculationItem::RoofRepairQuote(i) => {
                CalculationOutcome::RoofRepairQuote(roofing_quote::calculate(i, prices)?)
            }
            CalculationItem::StudWall(i) => CalculationOutcome::StudWall(joinery::calculate_stud_wall(i, prices)?),
            CalculationItem::Skirting(i) => CalculationOutcome::Skirting(joinery::calculate_skirting(i, prices)?),
            CalculationItem::CisGrossToNet(i) => CalculationOutcome::CisGrossToNet(cis_tax::gross_to_net(i)?),
            CalculationItem::CisNetToGross(i) => CalculationOutcome::CisNetToGross(cis_tax::net_to_gross(i)?),
        })
    }
}

/// Enum wrapper for all calculation results, one variant per calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutcome {
    BspLookup(BspLookupResult),
    VoltageDrop(VoltageDropResult),
    CableSizing(CableSizingResult),
    Quantity(QuantityResult),
    Concrete(ConcreteResult),
    Plaster(PlasterResult),
    Tile(TileResult),
    Drainage(DrainageResult),
    Roofing(RoofingResult),
    RoofRepairQuote(RoofRepairQuoteResult),
    StudWall(StudWallResult),
    Skirting(SkirtingResult),
    CisGrossToNet(CisGrossToNetResult),
    CisNetToGross(CisNetToGrossResult),
}

impl CalculationOutcome {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculationOutcome::BspLookup(_) => CalculatorKind::BspLookup,
            CalculationOutcome::VoltageDrop(_) => CalculatorKind::VoltageDrop,
            CalculationOutcome::CableSizing(_) => CalculatorKind::CableSizing,
            CalculationOutcome::Quantity(_) => CalculatorKind::Quantity,
            CalculationOutcome::Concrete(_) => CalculatorKind::Concrete,
            CalculationOutcome::Plaster(_) => CalculatorKind::Plaster,
            CalculationOutcome::Tile(_) => CalculatorKind::Tile,
            CalculationOutcome::Drainage(_) => CalculatorKind::Drainage,
            CalculationOutcome::Roofing(_) => CalculatorKind::Roofing,
            CalculationOutcome::RoofRepairQuote(_) => CalculatorKind::RoofRepairQuote,
            CalculationOutcome::StudWall(_) => CalculatorKind::StudWall,
            CalculationOutcome::Skirting(_) => CalculatorKind::Skirting,
            CalculationOutcome::CisGrossToNet(_) => CalculatorKind::CisGrossToNet,
            CalculationOutcome::CisNetToGross(_) => CalculatorKind::CisNetToGross,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::DEFAULT_PRICE_LIST;

    #[test]
    fn test_kind_names_roundtrip() {
        for kind in CalculatorKind::ALL {
            assert_eq!(CalculatorKind::from_name(kind.as_str()).unwrap(), kind);
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
        assert!(CalculatorKind::from_name("rafter").is_err());
    }

    #[test]
    fn test_item_dispatch() {
        let item = CalculationItem::CisGrossToNet(CisGrossToNetInput {
            label: "Invoice".to_string(),
            labour: 1000.0,
            materials: 200.0,
            rate: CisRate::Registered,
            apply_vat: false,
        });
        assert_eq!(item.label(), "Invoice");
        assert_eq!(item.calc_type(), "cis-gross-to-net");

        let outcome = item.calculate(&DEFAULT_PRICE_LIST).unwrap();
        assert_eq!(outcome.kind(), item.kind());
        match outcome {
            CalculationOutcome::CisGrossToNet(r) => assert_eq!(r.hmrc_payment.0, 200.0),
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_item_tagged_json() {
        let json = r#"{
            "type": "VoltageDrop",
            "label": "Garage",
            "current_a": 20.0,
            "length_m": 10.0,
            "cable_mm2": 2.5,
            "circuit": "power"
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.kind(), CalculatorKind::VoltageDrop);
        let outcome = item.calculate(&DEFAULT_PRICE_LIST).unwrap();
        let out_json = serde_json::to_string(&outcome).unwrap();
        assert!(out_json.contains("\"type\":\"VoltageDrop\""));
        let back: CalculationOutcome = serde_json::from_str(&out_json).unwrap();
        match back {
            CalculationOutcome::VoltageDrop(r) => {
                assert!(r.compliant);
                assert!((r.voltage_drop_v - 2.964).abs() < 1e-9);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_invalid_item_is_error_not_panic() {
        let item = CalculationItem::Quantity(QuantityInput {
            label: "bad".to_string(),
            quantity: 10.0,
            coverage_per_unit: 0.0,
            waste_percent: 10.0,
            unit_name: "bag".to_string(),
        });
        let err = item.calculate(&DEFAULT_PRICE_LIST).unwrap_err();
        assert!(err.is_validation_failure());
    }
}
