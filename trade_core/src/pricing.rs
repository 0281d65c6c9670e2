//! # Price List
//!
//! Versioned material and hire prices used by the cost-bearing calculators.
//! A built-in list ships with the crate; a TOML file can override any subset
//! of it.
//!
//! ## TOML Format
//!
//! ```toml
//! version = "2026-Q1"
//!
//! [concrete]
//! cement_bag_25kg = 7.95
//!
//! [drainage]
//! skip_8_yard = 320.0
//! ```
//!
//! Sections and fields that are left out keep their built-in values. The
//! `version` key is required, so prices from a file are never tagged with
//! the built-in version.
//!
//! ## Example
//!
//! ```rust
//! use trade_core::pricing::PriceList;
//!
//! let prices = PriceList::from_toml_str("version = \"test\"\n[concrete]\ncement_bag_25kg = 9.0", "inline")?;
//! assert_eq!(prices.concrete.cement_bag_25kg.0, 9.0);
//! assert_eq!(prices.version, "test");
//! # Ok::<(), trade_core::errors::CalcError>(())
//! ```

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::units::Gbp;

/// Version tag of the built-in price list
pub const DEFAULT_PRICE_VERSION: &str = "2025-Q4";

/// Built-in UK trade counter prices, ex VAT.
pub static DEFAULT_PRICE_LIST: Lazy<PriceList> = Lazy::new(PriceList::default);

/// Complete price list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceList {
    /// Version tag recorded alongside any costed result
    pub version: String,
    pub concrete: ConcretePrices,
    pub plaster: PlasterPrices,
    pub tiling: TilingPrices,
    pub drainage: DrainagePrices,
    pub roofing: RoofingPrices,
    pub joinery: JoineryPrices,
}

impl Default for PriceList {
    fn default() -> Self {
        PriceList {
            version: DEFAULT_PRICE_VERSION.to_string(),
            concrete: ConcretePrices::default(),
            plaster: PlasterPrices::default(),
            tiling: TilingPrices::default(),
            drainage: DrainagePrices::default(),
            roofing: RoofingPrices::default(),
            joinery: JoineryPrices::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcretePrices {
    pub cement_bag_25kg: Gbp,
    pub sand_bulk_bag: Gbp,
    pub ballast_bulk_bag: Gbp,
    pub premixed_bag_20kg: Gbp,
    pub ready_mix_per_m3: Gbp,
}

impl Default for ConcretePrices {
    fn default() -> Self {
        ConcretePrices {
            cement_bag_25kg: Gbp(7.50),
            sand_bulk_bag: Gbp(55.00),
            ballast_bulk_bag: Gbp(55.00),
            premixed_bag_20kg: Gbp(6.50),
            ready_mix_per_m3: Gbp(130.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlasterPrices {
    pub multi_finish_bag: Gbp,
    pub board_finish_bag: Gbp,
    pub bonding_bag: Gbp,
    pub hardwall_bag: Gbp,
}

impl Default for PlasterPrices {
    fn default() -> Self {
        PlasterPrices {
            multi_finish_bag: Gbp(11.50),
            board_finish_bag: Gbp(11.00),
            bonding_bag: Gbp(14.00),
            hardwall_bag: Gbp(13.50),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilingPrices {
    pub adhesive_bag_20kg: Gbp,
    pub grout_bag_5kg: Gbp,
}

impl Default for TilingPrices {
    fn default() -> Self {
        TilingPrices {
            adhesive_bag_20kg: Gbp(18.00),
            grout_bag_5kg: Gbp(12.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrainagePrices {
    pub skip_8_yard: Gbp,
    pub pipe_3m: Gbp,
    pub pea_gravel_bulk_bag: Gbp,
}

impl Default for DrainagePrices {
    fn default() -> Self {
        DrainagePrices {
            skip_8_yard: Gbp(300.00),
            pipe_3m: Gbp(28.00),
            pea_gravel_bulk_bag: Gbp(65.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoofingPrices {
    pub plain_clay_tile: Gbp,
    pub concrete_interlocking_tile: Gbp,
    pub natural_slate: Gbp,
    pub fibre_cement_slate: Gbp,
    pub batten_4_8m: Gbp,
    pub underlay_roll: Gbp,
    pub scaffold_per_week: Gbp,
}

impl Default for RoofingPrices {
    fn default() -> Self {
        RoofingPrices {
            plain_clay_tile: Gbp(0.65),
            concrete_interlocking_tile: Gbp(1.60),
            natural_slate: Gbp(2.20),
            fibre_cement_slate: Gbp(1.30),
            batten_4_8m: Gbp(6.50),
            underlay_roll: Gbp(55.00),
            scaffold_per_week: Gbp(450.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoineryPrices {
    pub cls_4_8m: Gbp,
    pub plasterboard_sheet: Gbp,
    pub skirting_length: Gbp,
}

impl Default for JoineryPrices {
    fn default() -> Self {
        JoineryPrices {
            cls_4_8m: Gbp(9.00),
            plasterboard_sheet: Gbp(11.00),
            skirting_length: Gbp(14.00),
        }
    }
}

impl PriceList {
    /// Parse a price list from TOML. `source_name` is only used in errors.
    pub fn from_toml_str(content: &str, source_name: &str) -> CalcResult<Self> {
        let table: toml::Table =
            toml::from_str(content).map_err(|e| CalcError::config_error(source_name, e.to_string()))?;
        if !table.contains_key("version") {
            return Err(CalcError::config_error(source_name, "version is required in a price list file"));
        }
        let prices: PriceList = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| CalcError::config_error(source_name, e.to_string()))?;
        prices.validate(source_name)?;
        debug!(source = source_name, version = %prices.version, "price list parsed");
        Ok(prices)
    }

    /// Load a price list file.
    pub fn load(path: &Path) -> CalcResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CalcError::file_error("read price list", path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load from `path` when given, otherwise use the built-in list.
    pub fn load_or_default(path: Option<&Path>) -> CalcResult<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(DEFAULT_PRICE_LIST.clone()),
        }
    }

    /// Serialize to TOML (for writing out a template to edit).
    pub fn to_toml_string(&self) -> CalcResult<String> {
        toml::to_string_pretty(self).map_err(|e| CalcError::SerializationError {
            reason: e.to_string(),
        })
    }

    fn validate(&self, source_name: &str) -> CalcResult<()> {
        if self.version.trim().is_empty() {
            return Err(CalcError::config_error(source_name, "version must not be empty"));
        }
        for (name, price) in self.entries() {
            if !price.0.is_finite() || price.0 < 0.0 {
                return Err(CalcError::config_error(
                    source_name,
                    format!("price '{}' must be a non-negative number, got {}", name, price.0),
                ));
            }
        }
        Ok(())
    }

    /// Every price with its dotted key, in file order.
    pub fn entries(&self) -> Vec<(&'static str, Gbp)> {
        vec![
            ("concrete.cement_bag_25kg", self.concrete.cement_bag_25kg),
            ("concrete.sand_bulk_bag", self.concrete.sand_bulk_bag),
            ("concrete.ballast_bulk_bag", self.concrete.ballast_bulk_bag),
            ("concrete.premixed_bag_20kg", self.concrete.premixed_bag_20kg),
            ("concrete.ready_mix_per_m3", self.concrete.ready_mix_per_m3),
            ("plaster.multi_finish_bag", self.plaster.multi_finish_bag),
            ("plaster.board_finish_bag", self.plaster.board_finish_bag),
            ("plaster.bonding_bag", self.plaster.bonding_bag),
            ("plaster.hardwall_bag", self.plaster.hardwall_bag),
            ("tiling.adhesive_bag_20kg", self.tiling.adhesive_bag_20kg),
            ("tiling.grout_bag_5kg", self.tiling.grout_bag_5kg),
            ("drainage.skip_8_yard", self.drainage.skip_8_yard),
            ("drainage.pipe_3m", self.drainage.pipe_3m),
            ("drainage.pea_gravel_bulk_bag", self.drainage.pea_gravel_bulk_bag),
            ("roofing.plain_clay_tile", self.roofing.plain_clay_tile),
            ("roofing.concrete_interlocking_tile", self.roofing.concrete_interlocking_tile),
            ("roofing.natural_slate", self.roofing.natural_slate),
            ("roofing.fibre_cement_slate", self.roofing.fibre_cement_slate),
            ("roofing.batten_4_8m", self.roofing.batten_4_8m),
            ("roofing.underlay_roll", self.roofing.underlay_roll),
            ("roofing.scaffold_per_week", self.roofing.scaffold_per_week),
            ("joinery.cls_4_8m", self.joinery.cls_4_8m),
            ("joinery.plasterboard_sheet", self.joinery.plasterboard_sheet),
            ("joinery.skirting_length", self.joinery.skirting_length),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_version() {
        assert_eq!(DEFAULT_PRICE_LIST.version, DEFAULT_PRICE_VERSION);
        assert!(DEFAULT_PRICE_LIST.entries().iter().all(|(_, p)| p.0 > 0.0));
    }

    #[test]
    fn test_partial_override_keeps_defaults() {
        let toml = r#"
version = "2026-Q1"

[drainage]
skip_8_yard = 320.0
"#;
        let prices = PriceList::from_toml_str(toml, "test").unwrap();
        assert_eq!(prices.version, "2026-Q1");
        assert_eq!(prices.drainage.skip_8_yard, Gbp(320.0));
        assert_eq!(prices.drainage.pipe_3m, DEFAULT_PRICE_LIST.drainage.pipe_3m);
        assert_eq!(prices.roofing, DEFAULT_PRICE_LIST.roofing);
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = PriceList::from_toml_str("version = \"x\"\n[plaster]\nbonding_bag = -1.0", "bad.toml").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("plaster.bonding_bag"));
    }

    #[test]
    fn test_override_without_version_rejected() {
        let err = PriceList::from_toml_str("[concrete]\nready_mix_per_m3 = 999.0", "mine.toml").unwrap_err();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("version"));
        assert!(err.to_string().contains("mine.toml"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = PriceList::from_toml_str("version = ", "bad.toml").unwrap_err();
        assert!(matches!(err, CalcError::ConfigError { .. }));
    }

    #[test]
    fn test_toml_roundtrip() {
        let text = DEFAULT_PRICE_LIST.to_toml_string().unwrap();
        let parsed = PriceList::from_toml_str(&text, "roundtrip").unwrap();
        assert_eq!(parsed, *DEFAULT_PRICE_LIST);
    }

    #[test]
    fn test_load_or_default_without_path() {
        let prices = PriceList::load_or_default(None).unwrap();
        assert_eq!(prices.version, DEFAULT_PRICE_VERSION);
    }
}
