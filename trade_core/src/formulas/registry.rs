//! # Formula Registry
//!
//! Central registry of every formula the calculators use. Each formula has
//! metadata including its source reference, plain-text form and variable
//! definitions, so the whole set can be printed as a single reference table.
//!
//! ## Usage
//!
//! ```rust
//! use trade_core::formulas::registry::Formula;
//!
//! let meta = Formula::VoltageDropSinglePhase.metadata();
//! assert_eq!(meta.formula_plain, "Vd = I * L * R * 2");
//! println!("Reference: {}", meta.reference.citation());
//! ```

use serde::Serialize;

use crate::calculations::CalculatorKind;

// ============================================================================
// References
// ============================================================================

/// Source that a formula or constant is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    /// BS 7671 Requirements for Electrical Installations (IET Wiring Regulations)
    Bs7671 {
        edition: &'static str,
        clause: &'static str,
    },
    /// BS EN ISO 228-1 Pipe threads where pressure-tight joints are not made on the threads
    BsEnIso228,
    /// HMRC guidance publication
    Hmrc { publication: &'static str },
    /// Manufacturer coverage or yield data
    Manufacturer { data: &'static str },
    /// Established site practice (no standard to cite)
    TradePractice,
    /// Plain geometry
    Geometry,
}

impl Reference {
    /// Format the reference for the formula table
    pub fn citation(&self) -> String {
        match self {
            Reference::Bs7671 { edition, clause } => format!("BS 7671:{} {}", edition, clause),
            Reference::BsEnIso228 => "BS EN ISO 228-1".to_string(),
            Reference::Hmrc { publication } => format!("HMRC {}", publication),
            Reference::Manufacturer { data } => format!("Manufacturer data: {}", data),
            Reference::TradePractice => "Trade practice".to_string(),
            Reference::Geometry => "Geometry".to_string(),
        }
    }
}

const BS7671_TABLE_4D1B: Reference = Reference::Bs7671 {
    edition: "2018+A2:2022",
    clause: "Appendix 4, Table 4D1B",
};

const BS7671_APPENDIX_12: Reference = Reference::Bs7671 {
    edition: "2018+A2:2022",
    clause: "Appendix 12",
};

// ============================================================================
// Categories
// ============================================================================

/// Grouping for the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormulaCategory {
    /// Voltage drop and cable selection
    Electrical,
    /// Reference table lookups
    Lookups,
    /// Material quantities
    Materials,
    /// CIS and VAT
    Tax,
}

impl FormulaCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            FormulaCategory::Electrical => "Electrical",
            FormulaCategory::Lookups => "Lookups",
            FormulaCategory::Materials => "Materials",
            FormulaCategory::Tax => "Tax",
        }
    }

    /// Sort order for the reference table (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            FormulaCategory::Electrical => 1,
            FormulaCategory::Lookups => 2,
            FormulaCategory::Materials => 3,
            FormulaCategory::Tax => 4,
        }
    }

    /// All categories in table order
    pub fn all() -> Vec<FormulaCategory> {
        let mut cats = vec![
            FormulaCategory::Electrical,
            FormulaCategory::Lookups,
            FormulaCategory::Materials,
            FormulaCategory::Tax,
        ];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in a formula.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "I", "L")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "A", "m", "£")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Formula Metadata
// ============================================================================

/// Complete metadata for one formula.
#[derive(Debug, Clone)]
pub struct FormulaMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this formula calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Standard or source
    pub reference: Reference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: FormulaCategory,
    /// Source module where the formula implementation lives
    pub source_module: &'static str,
    /// Function name implementing the formula
    pub source_function: &'static str,
}

// ============================================================================
// Formula Enum
// ============================================================================

/// Every formula used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[non_exhaustive]
pub enum Formula {
    // Electrical
    /// Vd = I × L × R × 2
    VoltageDropSinglePhase,
    /// Vd = I × L × R × 2 × 0.866
    VoltageDropThreePhase,
    /// Vd% = Vd / U0 × 100
    VoltageDropPercent,
    /// Vd% ≤ 3 (lighting) / 5 (power)
    VoltageDropLimit,
    /// L_max for the limit
    MaxRunLength,
    /// Stepwise current → cable size
    CableSizeByCurrent,
    /// Step up until compliant
    CableSizeByVoltageDrop,

    // Lookups
    /// argmin |OD − measured|
    BspNearestDiameter,
    /// exact TPI filter
    BspThreadsPerInch,

    // Materials
    /// ceil(Q / C × (1 + w))
    WasteAdjustedUnits,
    /// V = L × W × D
    RectangularVolume,
    /// Dry volume and mix proportions
    ConcreteMixProportions,
    /// Plaster bags
    PlasterBags,
    /// Adhesive bed
    TileAdhesive,
    /// Grout for joints
    GroutQuantity,
    /// Spoil bulking
    BulkedSpoil,
    /// Pipe bedding volume
    PipeBedding,
    /// A_plan / cos θ
    PitchedRoofArea,
    /// Battens per m²
    BattenLength,
    /// ceil(L / s) + 1
    StudsAtCentres,

    // Tax
    /// D = labour × r
    CisDeduction,
    /// gross = net / (1 − r)
    CisNetToGross,
    /// VAT on subtotal
    VatOnSubtotal,
}

impl Formula {
    /// Get the full metadata for this formula
    pub fn metadata(&self) -> FormulaMetadata {
        match self {
            Formula::VoltageDropSinglePhase => FormulaMetadata {
                name: "Single-Phase Voltage Drop",
                description: "Voltage lost along the live and neutral conductors of a single-phase run",
                formula_plain: "Vd = I * L * R * 2",
                reference: BS7671_TABLE_4D1B,
                variables: vec![
                    Variable::new("I", "Design current", "A"),
                    Variable::new("L", "Route length (one way)", "m"),
                    Variable::new("R", "Conductor resistance", "Ω/m"),
                    Variable::new("Vd", "Voltage drop", "V"),
                ],
                assumptions: vec!["Copper conductors at 20 °C", "Reactance neglected (≤ 16mm²)"],
                category: FormulaCategory::Electrical,
                source_module: "formulas/electrical.rs",
                source_function: "voltage_drop_volts",
            },

            Formula::VoltageDropThreePhase => FormulaMetadata {
                name: "Three-Phase Voltage Drop",
                description: "Line-to-line voltage drop for a balanced three-phase run",
                formula_plain: "Vd = I * L * R * 2 * 0.866",
                reference: BS7671_TABLE_4D1B,
                variables: vec![
                    Variable::new("I", "Design line current", "A"),
                    Variable::new("L", "Route length (one way)", "m"),
                    Variable::new("R", "Conductor resistance", "Ω/m"),
                ],
                assumptions: vec!["Balanced load", "Copper conductors at 20 °C"],
                category: FormulaCategory::Electrical,
                source_module: "formulas/electrical.rs",
                source_function: "voltage_drop_volts",
            },

            Formula::VoltageDropPercent => FormulaMetadata {
                name: "Voltage Drop Percentage",
                description: "Voltage drop as a share of the nominal supply",
                formula_plain: "Vd% = Vd / U0 * 100",
                reference: BS7671_APPENDIX_12,
                variables: vec![
                    Variable::new("Vd", "Voltage drop", "V"),
                    Variable::new("U0", "Nominal supply (230 single-phase, 400 three-phase)", "V"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Electrical,
                source_module: "formulas/electrical.rs",
                source_function: "percent_of_supply",
            },

            Formula::VoltageDropLimit => FormulaMetadata {
                name: "Voltage Drop Limit",
                description: "Compliance check against the permitted drop for the circuit type",
                formula_plain: "compliant = Vd% <= 3 (lighting), Vd% <= 5 (power)",
                reference: BS7671_APPENDIX_12,
                variables: vec![Variable::new("Vd%", "Voltage drop percentage", "%")],
                assumptions: vec!["Installation supplied from a public LV network"],
                category: FormulaCategory::Electrical,
                source_module: "calculations/voltage_drop.rs",
                source_function: "calculate",
            },

            Formula::MaxRunLength => FormulaMetadata {
                name: "Maximum Run Length",
                description: "Longest run of a given cable that stays within the drop limit",
                formula_plain: "L_max = (limit / 100 * U0) / (I * R * k)",
                reference: BS7671_APPENDIX_12,
                variables: vec![
                    Variable::new("limit", "Permitted drop", "%"),
                    Variable::new("k", "Circuit factor (2 or 1.732)", "-"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Electrical,
                source_module: "formulas/electrical.rs",
                source_function: "max_run_length_m",
            },

            Formula::CableSizeByCurrent => FormulaMetadata {
                name: "Cable Size by Current",
                description: "Ordered threshold classification of design current to conductor size",
                formula_plain: "<=10A: 1.5, <=16A: 2.5, <=25A: 4, <=32A: 6, <=40A: 10, else 16+ (mm²)",
                reference: Reference::TradePractice,
                variables: vec![Variable::new("I", "Design current", "A")],
                assumptions: vec!["Clipped direct, no grouping or thermal insulation derating"],
                category: FormulaCategory::Electrical,
                source_module: "calculations/cable_sizing.rs",
                source_function: "size_for_current",
            },

            Formula::CableSizeByVoltageDrop => FormulaMetadata {
                name: "Cable Size by Voltage Drop",
                description: "Smallest table size at or above the current-based size that meets the drop limit",
                formula_plain: "first S >= S_current where Vd%(S) <= limit",
                reference: BS7671_APPENDIX_12,
                variables: vec![Variable::new("S", "Conductor cross-section", "mm²")],
                assumptions: vec![],
                category: FormulaCategory::Electrical,
                source_module: "calculations/cable_sizing.rs",
                source_function: "size_for_voltage_drop",
            },

            Formula::BspNearestDiameter => FormulaMetadata {
                name: "BSP Nearest Diameter",
                description: "Thread whose major diameter is closest to the measured value",
                formula_plain: "argmin |OD - d_measured| (first in table order on ties)",
                reference: Reference::BsEnIso228,
                variables: vec![
                    Variable::new("OD", "Thread major diameter", "mm"),
                    Variable::new("d_measured", "Measured diameter across the crests", "mm"),
                ],
                assumptions: vec!["Parallel (G) thread"],
                category: FormulaCategory::Lookups,
                source_module: "calculations/bsp_thread.rs",
                source_function: "find_by_diameter",
            },

            Formula::BspThreadsPerInch => FormulaMetadata {
                name: "BSP Threads per Inch",
                description: "All threads with an exact TPI match",
                formula_plain: "{ t : t.TPI = TPI_measured }",
                reference: Reference::BsEnIso228,
                variables: vec![Variable::new("TPI", "Threads per inch", "1/in")],
                assumptions: vec![],
                category: FormulaCategory::Lookups,
                source_module: "calculations/bsp_thread.rs",
                source_function: "find_by_tpi",
            },

            Formula::WasteAdjustedUnits => FormulaMetadata {
                name: "Waste-Adjusted Unit Count",
                description: "Whole units needed to cover a quantity with a waste allowance",
                formula_plain: "n = ceil(Q / C * (1 + w / 100))",
                reference: Reference::TradePractice,
                variables: vec![
                    Variable::new("Q", "Area, volume or length to cover", "m² / m³ / m"),
                    Variable::new("C", "Coverage of one unit", "same as Q"),
                    Variable::new("w", "Waste allowance", "%"),
                ],
                assumptions: vec!["Units are not split between jobs"],
                category: FormulaCategory::Materials,
                source_module: "formulas/quantities.rs",
                source_function: "rounded_units",
            },

            Formula::RectangularVolume => FormulaMetadata {
                name: "Rectangular Volume",
                description: "Volume of a slab, footing or trench",
                formula_plain: "V = L * W * D",
                reference: Reference::Geometry,
                variables: vec![
                    Variable::new("L", "Length", "m"),
                    Variable::new("W", "Width", "m"),
                    Variable::new("D", "Depth", "m"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Materials,
                source_module: "formulas/quantities.rs",
                source_function: "rectangular_volume",
            },

            Formula::ConcreteMixProportions => FormulaMetadata {
                name: "Concrete Mix Proportions",
                description: "Cement, sand and ballast for a wet volume at a nominal mix ratio",
                formula_plain: "M_i = V * 1.54 * (r_i / Σr) * ρ_i",
                reference: Reference::TradePractice,
                variables: vec![
                    Variable::new("V", "Wet volume", "m³"),
                    Variable::new("r_i", "Mix ratio part (cement:sand:ballast)", "-"),
                    Variable::new("ρ_i", "Loose bulk density", "kg/m³"),
                ],
                assumptions: vec!["Dry volume factor 1.54", "Cement 1440, sand 1600, ballast 1500 kg/m³"],
                category: FormulaCategory::Materials,
                source_module: "calculations/concrete.rs",
                source_function: "calculate",
            },

            Formula::PlasterBags => FormulaMetadata {
                name: "Plaster Bags",
                description: "25kg bags for an area and number of coats",
                formula_plain: "n = ceil(A * coats / C_bag * (1 + w / 100))",
                reference: Reference::Manufacturer { data: "25kg bag coverage per coat" },
                variables: vec![
                    Variable::new("A", "Wall or ceiling area", "m²"),
                    Variable::new("C_bag", "Coverage of one bag for one coat", "m²"),
                ],
                assumptions: vec!["Nominal coat thickness for the plaster type"],
                category: FormulaCategory::Materials,
                source_module: "calculations/plaster.rs",
                source_function: "calculate",
            },

            Formula::TileAdhesive => FormulaMetadata {
                name: "Tile Adhesive",
                description: "Adhesive by bed thickness band for the tile size",
                formula_plain: "kg = A * rate(tile size) * (1 + w / 100)",
                reference: Reference::Manufacturer { data: "notched trowel bed rates" },
                variables: vec![
                    Variable::new("A", "Tiled area", "m²"),
                    Variable::new("rate", "Adhesive consumption", "kg/m²"),
                ],
                assumptions: vec!["Solid bed, large format back-buttered"],
                category: FormulaCategory::Materials,
                source_module: "calculations/tile.rs",
                source_function: "adhesive_rate_kg_per_m2",
            },

            Formula::GroutQuantity => FormulaMetadata {
                name: "Grout Quantity",
                description: "Grout for the joint volume between tiles",
                formula_plain: "kg/m² = (L + W) / (L * W) * j * t * 1.6",
                reference: Reference::Manufacturer { data: "cementitious grout yield" },
                variables: vec![
                    Variable::new("L, W", "Tile length and width", "mm"),
                    Variable::new("j", "Joint width", "mm"),
                    Variable::new("t", "Tile thickness", "mm"),
                ],
                assumptions: vec!["Grout density 1.6 kg/l"],
                category: FormulaCategory::Materials,
                source_module: "calculations/tile.rs",
                source_function: "grout_kg_per_m2",
            },

            Formula::BulkedSpoil => FormulaMetadata {
                name: "Bulked Spoil",
                description: "Loose volume of excavated ground",
                formula_plain: "V_loose = L * W * D * 1.25",
                reference: Reference::TradePractice,
                variables: vec![Variable::new("V_loose", "Volume to remove", "m³")],
                assumptions: vec!["Bulking factor 1.25 for clay and topsoil", "8 yard skip holds 6.1 m³"],
                category: FormulaCategory::Materials,
                source_module: "calculations/drainage.rs",
                source_function: "calculate",
            },

            Formula::PipeBedding => FormulaMetadata {
                name: "Pipe Bedding",
                description: "Pea gravel bed and surround less the pipe itself",
                formula_plain: "V = L * W * (0.1 + d + 0.1) - π * (d/2)^2 * L",
                reference: Reference::TradePractice,
                variables: vec![
                    Variable::new("d", "Pipe outside diameter", "m"),
                    Variable::new("W", "Trench width", "m"),
                ],
                assumptions: vec!["100mm bed and 100mm cover over the crown"],
                category: FormulaCategory::Materials,
                source_module: "calculations/drainage.rs",
                source_function: "calculate",
            },

            Formula::PitchedRoofArea => FormulaMetadata {
                name: "Pitched Roof Area",
                description: "Slope area from plan area and pitch",
                formula_plain: "A = A_plan / cos(θ)",
                reference: Reference::Geometry,
                variables: vec![
                    Variable::new("A_plan", "Plan area", "m²"),
                    Variable::new("θ", "Roof pitch", "°"),
                ],
                assumptions: vec!["Single plane; hips and valleys covered by waste allowance"],
                category: FormulaCategory::Materials,
                source_module: "formulas/quantities.rs",
                source_function: "pitched_area",
            },

            Formula::BattenLength => FormulaMetadata {
                name: "Batten Length",
                description: "Linear metres of batten for a slope at the tile gauge",
                formula_plain: "m = A / gauge",
                reference: Reference::Manufacturer { data: "tile gauge" },
                variables: vec![Variable::new("gauge", "Batten gauge", "m")],
                assumptions: vec![],
                category: FormulaCategory::Materials,
                source_module: "calculations/roofing.rs",
                source_function: "calculate",
            },

            Formula::StudsAtCentres => FormulaMetadata {
                name: "Studs at Centres",
                description: "Members at fixed spacing along a run, both ends included",
                formula_plain: "n = ceil(L / s) + 1",
                reference: Reference::TradePractice,
                variables: vec![
                    Variable::new("L", "Wall length", "m"),
                    Variable::new("s", "Stud centres", "m"),
                ],
                assumptions: vec![],
                category: FormulaCategory::Materials,
                source_module: "formulas/quantities.rs",
                source_function: "members_at_centres",
            },

            Formula::CisDeduction => FormulaMetadata {
                name: "CIS Deduction",
                description: "Tax withheld from the labour element of a payment",
                formula_plain: "D = labour * r; net = labour - D + materials",
                reference: Reference::Hmrc { publication: "CIS340" },
                variables: vec![
                    Variable::new("r", "CIS rate (0, 0.20, 0.30)", "-"),
                    Variable::new("D", "Deduction paid to HMRC", "£"),
                ],
                assumptions: vec!["Materials are not subject to deduction"],
                category: FormulaCategory::Tax,
                source_module: "formulas/tax.rs",
                source_function: "cis_deduction",
            },

            Formula::CisNetToGross => FormulaMetadata {
                name: "CIS Net to Gross",
                description: "Labour to invoice so a target amount is received after deduction",
                formula_plain: "gross = net / (1 - r)",
                reference: Reference::Hmrc { publication: "CIS340" },
                variables: vec![Variable::new("net", "Target labour received", "£")],
                assumptions: vec!["r < 1"],
                category: FormulaCategory::Tax,
                source_module: "formulas/tax.rs",
                source_function: "gross_from_net",
            },

            Formula::VatOnSubtotal => FormulaMetadata {
                name: "VAT on Subtotal",
                description: "Standard-rate VAT applied to the payable subtotal",
                formula_plain: "VAT = subtotal * 0.20",
                reference: Reference::Hmrc { publication: "VAT Notice 700" },
                variables: vec![Variable::new("subtotal", "Net labour plus materials", "£")],
                assumptions: vec!["VAT-registered supplier"],
                category: FormulaCategory::Tax,
                source_module: "formulas/tax.rs",
                source_function: "vat_on",
            },
        }
    }

    /// Get all formulas in a given category
    pub fn in_category(category: FormulaCategory) -> Vec<Formula> {
        ALL_FORMULAS
            .iter()
            .filter(|f| f.metadata().category == category)
            .copied()
            .collect()
    }
}

/// All formulas in the registry (for iteration)
pub static ALL_FORMULAS: &[Formula] = &[
    Formula::VoltageDropSinglePhase,
    Formula::VoltageDropThreePhase,
    Formula::VoltageDropPercent,
    Formula::VoltageDropLimit,
    Formula::MaxRunLength,
    Formula::CableSizeByCurrent,
    Formula::CableSizeByVoltageDrop,
    Formula::BspNearestDiameter,
    Formula::BspThreadsPerInch,
    Formula::WasteAdjustedUnits,
    Formula::RectangularVolume,
    Formula::ConcreteMixProportions,
    Formula::PlasterBags,
    Formula::TileAdhesive,
    Formula::GroutQuantity,
    Formula::BulkedSpoil,
    Formula::PipeBedding,
    Formula::PitchedRoofArea,
    Formula::BattenLength,
    Formula::StudsAtCentres,
    Formula::CisDeduction,
    Formula::CisNetToGross,
    Formula::VatOnSubtotal,
];

/// Formulas a calculator applies, in the order it applies them.
pub fn formulas_for(kind: CalculatorKind) -> Vec<Formula> {
    use Formula::*;
    match kind {
        CalculatorKind::BspLookup => vec![BspNearestDiameter, BspThreadsPerInch],
        CalculatorKind::VoltageDrop => vec![
            VoltageDropSinglePhase,
            VoltageDropThreePhase,
            VoltageDropPercent,
            VoltageDropLimit,
            MaxRunLength,
        ],
        CalculatorKind::CableSizing => vec![
            CableSizeByCurrent,
            CableSizeByVoltageDrop,
            VoltageDropSinglePhase,
            VoltageDropPercent,
        ],
        CalculatorKind::Quantity => vec![WasteAdjustedUnits],
        CalculatorKind::Concrete => vec![RectangularVolume, ConcreteMixProportions, WasteAdjustedUnits],
        CalculatorKind::Plaster => vec![PlasterBags, WasteAdjustedUnits],
        CalculatorKind::Tile => vec![WasteAdjustedUnits, TileAdhesive, GroutQuantity],
        CalculatorKind::Drainage => vec![RectangularVolume, BulkedSpoil, PipeBedding, WasteAdjustedUnits],
        CalculatorKind::Roofing | CalculatorKind::RoofRepairQuote => {
            vec![PitchedRoofArea, BattenLength, WasteAdjustedUnits]
        }
        CalculatorKind::StudWall => vec![StudsAtCentres, WasteAdjustedUnits],
        CalculatorKind::Skirting => vec![WasteAdjustedUnits],
        CalculatorKind::CisGrossToNet => vec![CisDeduction, VatOnSubtotal],
        CalculatorKind::CisNetToGross => vec![CisNetToGross, CisDeduction],
    }
}

/// Generate the formula reference table as markdown.
///
/// Used by the `gen-formulas` binary to produce FORMULAS.md.
pub fn generate_formulas_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# TradeCalc Formula Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-formulas`

Every calculator is a pure function of its inputs, the static tables and
(for costs) the price list. This document lists every formula they apply.

---

"#,
    );

    let categories = FormulaCategory::all();

    for category in &categories {
        let formulas = Formula::in_category(*category);
        if formulas.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for formula in formulas {
            let meta = formula.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Formulas:** {}\n- **Categories:** {}\n",
        ALL_FORMULAS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_formulas_have_metadata() {
        assert_eq!(ALL_FORMULAS.len(), 23);

        for f in ALL_FORMULAS {
            let meta = f.metadata();
            assert!(!meta.name.is_empty(), "Formula {:?} has no name", f);
            assert!(!meta.formula_plain.is_empty(), "Formula {:?} has no formula", f);
            assert!(!meta.variables.is_empty(), "Formula {:?} has no variables", f);
            assert!(!meta.source_module.is_empty());
            assert!(!meta.source_function.is_empty());
        }
    }

    #[test]
    fn test_reference_citation() {
        assert_eq!(
            BS7671_TABLE_4D1B.citation(),
            "BS 7671:2018+A2:2022 Appendix 4, Table 4D1B"
        );
        assert_eq!(Reference::Hmrc { publication: "CIS340" }.citation(), "HMRC CIS340");
    }

    #[test]
    fn test_every_calculator_lists_formulas() {
        for kind in CalculatorKind::ALL {
            assert!(!formulas_for(kind).is_empty(), "{:?} has no formulas", kind);
        }
    }

    #[test]
    fn test_categories_cover_registry() {
        let total: usize = FormulaCategory::all()
            .into_iter()
            .map(|c| Formula::in_category(c).len())
            .sum();
        assert_eq!(total, ALL_FORMULAS.len());
    }

    #[test]
    fn test_generate_formulas_markdown() {
        let markdown = generate_formulas_markdown();

        assert!(markdown.contains("# TradeCalc Formula Reference"));
        assert!(markdown.contains("## Electrical"));
        assert!(markdown.contains("## Tax"));
        assert!(markdown.contains("`Vd = I * L * R * 2`"));
        assert!(markdown.contains("`gross = net / (1 - r)`"));
        assert!(markdown.contains("BS 7671:2018+A2:2022"));
        assert!(markdown.contains("**Total Formulas:** 23"));
        assert!(markdown.contains("**Categories:** 4"));
    }
}
