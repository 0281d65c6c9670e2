//! CLI argument definitions using clap derive

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use trade_core::calculations::{
    BspLookupInput, BspQuery, CableSizingInput, CalculationItem, CircuitClass, CisGrossToNetInput, CisNetToGrossInput,
    CisRate, ConcreteApplication, ConcreteInput, DrainageInput, Phase, PlasterInput, PlasterType, QuantityInput,
    RoofRepairQuoteInput, RoofTile, RoofingInput, SkirtingInput, StudWallInput, TileInput, VoltageDropInput,
};
use trade_core::errors::CalcResult;

#[derive(Parser)]
#[command(name = "tradecalc")]
#[command(author, version, about = "UK trade calculators")]
#[command(long_about = "Voltage drop, cable sizing, BSP threads, material quantities and CIS tax, from the command line.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Price list TOML (default: built-in list)
    #[arg(long, global = true)]
    pub prices: Option<PathBuf>,

    /// Append the result to this job book (.tcj)
    #[arg(long, global = true)]
    pub save: Option<PathBuf>,

    /// Name recorded on the job book lock (default: login name)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Label for the calculation
    #[arg(long, short = 'l', global = true, default_value = "")]
    pub label: String,

    /// Print JSON only
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify a BSP thread by measured diameter or TPI
    Bsp(BspArgs),
    /// Voltage drop check against BS 7671 limits
    VoltageDrop(VoltageDropArgs),
    /// Cable size by current, optionally checked for voltage drop
    CableSize(CableSizeArgs),
    /// Whole units for a quantity, coverage and waste allowance
    Quantity(QuantityArgs),
    /// Concrete materials for a rectangular pour
    Concrete(ConcreteArgs),
    /// Plaster bags for an area
    Plaster(PlasterArgs),
    /// Tiles, adhesive and grout
    Tile(TileArgs),
    /// Drainage trench spoil, skips, pipe and bedding
    Drainage(DrainageArgs),
    /// Roof tiles, battens and underlay
    Roofing(RoofingArgs),
    /// Priced roofing repair quote
    RoofQuote(RoofQuoteArgs),
    /// Stud partition timber and plasterboard
    StudWall(StudWallArgs),
    /// Skirting stock lengths
    Skirting(SkirtingArgs),
    /// CIS deduction on an invoice (gross to net)
    Cis(CisArgs),
    /// Gross labour needed to receive a net amount after CIS
    CisGross(CisGrossArgs),
    /// Print the active price list as TOML
    Prices,
    /// Print the formula reference, or the formulas one calculator uses
    Formulas(FormulasArgs),
    /// List the jobs in a job book
    Jobs(JobsArgs),
}

/// Read a numeric form field. Blank, non-numeric and non-finite entries are
/// rejected before anything is calculated.
pub fn form_number(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("value is required".to_string());
    }
    let value: f64 = trimmed.parse().map_err(|_| format!("'{}' is not a number", trimmed))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", trimmed));
    }
    Ok(value)
}

// ============================================================================
// Choice enums (mapped onto core types)
// ============================================================================

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum CircuitArg {
    Lighting,
    Power,
}

impl From<CircuitArg> for CircuitClass {
    fn from(c: CircuitArg) -> Self {
        match c {
            CircuitArg::Lighting => CircuitClass::Lighting,
            CircuitArg::Power => CircuitClass::Power,
        }
    }
}

fn phase(three_phase: bool) -> Phase {
    if three_phase {
        Phase::Three
    } else {
        Phase::Single
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ApplicationArg {
    Foundation,
    Slab,
    Path,
    PostHole,
}

impl From<ApplicationArg> for ConcreteApplication {
    fn from(a: ApplicationArg) -> Self {
        match a {
            ApplicationArg::Foundation => ConcreteApplication::Foundation,
            ApplicationArg::Slab => ConcreteApplication::Slab,
            ApplicationArg::Path => ConcreteApplication::Path,
            ApplicationArg::PostHole => ConcreteApplication::PostHole,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PlasterArg {
    MultiFinish,
    BoardFinish,
    Bonding,
    Hardwall,
}

impl From<PlasterArg> for PlasterType {
    fn from(p: PlasterArg) -> Self {
        match p {
            PlasterArg::MultiFinish => PlasterType::MultiFinish,
            PlasterArg::BoardFinish => PlasterType::BoardFinish,
            PlasterArg::Bonding => PlasterType::Bonding,
            PlasterArg::Hardwall => PlasterType::Hardwall,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RoofTileArg {
    PlainClay,
    ConcreteInterlocking,
    NaturalSlate,
    FibreCementSlate,
}

impl From<RoofTileArg> for RoofTile {
    fn from(t: RoofTileArg) -> Self {
        match t {
            RoofTileArg::PlainClay => RoofTile::PlainClay,
            RoofTileArg::ConcreteInterlocking => RoofTile::ConcreteInterlocking,
            RoofTileArg::NaturalSlate => RoofTile::NaturalSlate,
            RoofTileArg::FibreCementSlate => RoofTile::FibreCementSlate,
        }
    }
}

// ============================================================================
// Calculator arguments
// ============================================================================

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("measure").required(true).args(["diameter", "tpi"])))]
pub struct BspArgs {
    /// Outer diameter across the crests (mm)
    #[arg(long, value_parser = form_number)]
    pub diameter: Option<f64>,
    /// Threads counted over one inch
    #[arg(long)]
    pub tpi: Option<u32>,
}

#[derive(Args, Debug)]
pub struct VoltageDropArgs {
    /// Design current (A)
    #[arg(long, value_parser = form_number)]
    pub current: f64,
    /// One-way run length (m)
    #[arg(long, value_parser = form_number)]
    pub length: f64,
    /// Cable size (mm²); sizes not in the table fall back to 2.5
    #[arg(long, value_parser = form_number, default_value = "2.5")]
    pub cable: f64,
    #[arg(long, value_enum, default_value = "power")]
    pub circuit: CircuitArg,
    /// Three-phase 400 V supply
    #[arg(long)]
    pub three_phase: bool,
}

#[derive(Args, Debug)]
pub struct CableSizeArgs {
    /// Design current (A)
    #[arg(long, value_parser = form_number)]
    pub current: f64,
    /// Run length (m); enables the voltage drop check
    #[arg(long, value_parser = form_number)]
    pub length: Option<f64>,
    #[arg(long, value_enum, default_value = "power")]
    pub circuit: CircuitArg,
    #[arg(long)]
    pub three_phase: bool,
}

#[derive(Args, Debug)]
pub struct QuantityArgs {
    /// Area, volume or length to cover
    #[arg(long, value_parser = form_number)]
    pub quantity: f64,
    /// Coverage of one unit
    #[arg(long, value_parser = form_number)]
    pub coverage: f64,
    /// Waste allowance (%)
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
    #[arg(long, default_value = "unit")]
    pub unit: String,
}

#[derive(Args, Debug)]
pub struct ConcreteArgs {
    #[arg(long, value_parser = form_number)]
    pub length: f64,
    #[arg(long, value_parser = form_number)]
    pub width: f64,
    #[arg(long, value_parser = form_number)]
    pub depth: f64,
    #[arg(long, value_enum, default_value = "slab")]
    pub application: ApplicationArg,
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
}

#[derive(Args, Debug)]
pub struct PlasterArgs {
    /// Area (m²)
    #[arg(long, value_parser = form_number)]
    pub area: f64,
    #[arg(long = "type", value_enum, default_value = "multi-finish")]
    pub plaster_type: PlasterArg,
    #[arg(long, default_value_t = 2)]
    pub coats: u32,
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
}

#[derive(Args, Debug)]
pub struct TileArgs {
    /// Area (m²)
    #[arg(long, value_parser = form_number)]
    pub area: f64,
    /// Tile length (mm)
    #[arg(long, value_parser = form_number)]
    pub tile_length: f64,
    /// Tile width (mm)
    #[arg(long, value_parser = form_number)]
    pub tile_width: f64,
    /// Tile thickness (mm)
    #[arg(long, value_parser = form_number, default_value = "8")]
    pub thickness: f64,
    /// Joint width (mm)
    #[arg(long, value_parser = form_number, default_value = "3")]
    pub joint: f64,
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
}

#[derive(Args, Debug)]
pub struct DrainageArgs {
    #[arg(long, value_parser = form_number)]
    pub length: f64,
    #[arg(long, value_parser = form_number)]
    pub width: f64,
    #[arg(long, value_parser = form_number)]
    pub depth: f64,
    /// Pipe outside diameter (mm)
    #[arg(long, value_parser = form_number, default_value = "110")]
    pub pipe_diameter: f64,
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
}

#[derive(Args, Debug, Clone)]
pub struct RoofingArgs {
    /// Plan area of the roof plane (m²)
    #[arg(long, value_parser = form_number)]
    pub plan_area: f64,
    /// Pitch (degrees)
    #[arg(long, value_parser = form_number)]
    pub pitch: f64,
    #[arg(long, value_enum, default_value = "concrete-interlocking")]
    pub tile: RoofTileArg,
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
}

#[derive(Args, Debug)]
pub struct RoofQuoteArgs {
    #[command(flatten)]
    pub roofing: RoofingArgs,
    #[arg(long, value_parser = form_number)]
    pub labour_days: f64,
    /// Day rate (£)
    #[arg(long, value_parser = form_number)]
    pub day_rate: f64,
    #[arg(long, value_parser = form_number, default_value = "0")]
    pub scaffold_weeks: f64,
    /// Contingency (%)
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub contingency: f64,
    /// Add VAT at 20%
    #[arg(long)]
    pub vat: bool,
}

#[derive(Args, Debug)]
pub struct StudWallArgs {
    #[arg(long, value_parser = form_number)]
    pub length: f64,
    #[arg(long, value_parser = form_number)]
    pub height: f64,
    /// Stud centres (mm)
    #[arg(long, value_parser = form_number, default_value = "600")]
    pub centres: f64,
    #[arg(long, default_value_t = 1)]
    pub noggin_rows: u32,
    /// Sides boarded (1 or 2)
    #[arg(long, default_value_t = 2)]
    pub sides: u32,
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
}

#[derive(Args, Debug)]
pub struct SkirtingArgs {
    /// Room perimeter (m)
    #[arg(long, value_parser = form_number)]
    pub perimeter: f64,
    #[arg(long, default_value_t = 0)]
    pub doors: u32,
    #[arg(long, value_parser = form_number, default_value = "0.9")]
    pub door_width: f64,
    #[arg(long, value_parser = form_number, default_value = "4.2")]
    pub stock_length: f64,
    #[arg(long, value_parser = form_number, default_value = "10")]
    pub waste: f64,
}

#[derive(Args, Debug)]
pub struct CisArgs {
    /// Labour (£)
    #[arg(long, value_parser = form_number)]
    pub labour: f64,
    /// Materials (£)
    #[arg(long, value_parser = form_number, default_value = "0")]
    pub materials: f64,
    /// CIS rate: 0, 20 or 30 (%)
    #[arg(long, default_value_t = 20)]
    pub rate: u32,
    /// Add VAT at 20% to the subtotal
    #[arg(long)]
    pub vat: bool,
}

#[derive(Args, Debug)]
pub struct CisGrossArgs {
    /// Labour wanted after deduction (£)
    #[arg(long, value_parser = form_number)]
    pub net: f64,
    /// CIS rate: 0, 20 or 30 (%)
    #[arg(long, default_value_t = 20)]
    pub rate: u32,
}

#[derive(Args, Debug)]
pub struct FormulasArgs {
    /// Calculator name (e.g. voltage-drop); omit for the full reference
    pub calculator: Option<String>,
}

#[derive(Args, Debug)]
pub struct JobsArgs {
    /// Job book file
    pub book: PathBuf,
    /// Only list jobs from this calculator (e.g. cis-gross-to-net)
    #[arg(long, conflicts_with_all = ["show", "remove"])]
    pub kind: Option<String>,
    /// Print one job as JSON
    #[arg(long, conflicts_with = "remove")]
    pub show: Option<Uuid>,
    /// Delete one job from the book
    #[arg(long)]
    pub remove: Option<Uuid>,
}

impl BspArgs {
    /// The "measure" group is required, so `--tpi` is present whenever
    /// `--diameter` is not. A TPI of 0 is refused by the lookup itself.
    fn query(&self) -> BspQuery {
        match self.diameter {
            Some(measured_mm) => BspQuery::Diameter { measured_mm },
            None => BspQuery::Tpi {
                tpi: self.tpi.unwrap_or_default(),
            },
        }
    }
}

impl RoofingArgs {
    fn into_input(self, label: &str) -> RoofingInput {
        RoofingInput {
            label: label.to_string(),
            plan_area_m2: self.plan_area,
            pitch_deg: self.pitch,
            tile: self.tile.into(),
            waste_percent: self.waste,
        }
    }
}

impl Commands {
    /// The calculation this command asks for, if it is a calculator.
    pub fn to_item(&self, label: &str) -> CalcResult<Option<CalculationItem>> {
        let label = label.to_string();
        let item = match self {
            Commands::Bsp(a) => CalculationItem::BspLookup(BspLookupInput {
                label,
                query: a.query(),
            }),
            Commands::VoltageDrop(a) => CalculationItem::VoltageDrop(VoltageDropInput {
                label,
                current_a: a.current,
                length_m: a.length,
                cable_mm2: a.cable,
                circuit: a.circuit.into(),
                phase: phase(a.three_phase),
            }),
            Commands::CableSize(a) => CalculationItem::CableSizing(CableSizingInput {
                label,
                current_a: a.current,
                length_m: a.length,
                circuit: a.circuit.into(),
                phase: phase(a.three_phase),
            }),
            Commands::Quantity(a) => CalculationItem::Quantity(QuantityInput {
                label,
                quantity: a.quantity,
                coverage_per_unit: a.coverage,
                waste_percent: a.waste,
                unit_name: a.unit.clone(),
            }),
            Commands::Concrete(a) => CalculationItem::Concrete(ConcreteInput {
                label,
                length_m: a.length,
                width_m: a.width,
                depth_m: a.depth,
                application: a.application.into(),
                waste_percent: a.waste,
            }),
            Commands::Plaster(a) => CalculationItem::Plaster(PlasterInput {
                label,
                area_m2: a.area,
                plaster_type: a.plaster_type.into(),
                coats: a.coats,
                waste_percent: a.waste,
            }),
            Commands::Tile(a) => CalculationItem::Tile(TileInput {
                label,
                area_m2: a.area,
                tile_length_mm: a.tile_length,
                tile_width_mm: a.tile_width,
                tile_thickness_mm: a.thickness,
                joint_width_mm: a.joint,
                waste_percent: a.waste,
            }),
            Commands::Drainage(a) => CalculationItem::Drainage(DrainageInput {
                label,
                length_m: a.length,
                width_m: a.width,
                depth_m: a.depth,
                pipe_diameter_mm: a.pipe_diameter,
                waste_percent: a.waste,
            }),
            Commands::Roofing(a) => CalculationItem::Roofing(a.clone().into_input(&label)),
            Commands::RoofQuote(a) => CalculationItem::RoofRepairQuote(RoofRepairQuoteInput {
                roofing: a.roofing.clone().into_input(&label),
                label,
                labour_days: a.labour_days,
                day_rate: a.day_rate,
                scaffold_weeks: a.scaffold_weeks,
                contingency_percent: a.contingency,
                apply_vat: a.vat,
            }),
            Commands::StudWall(a) => CalculationItem::StudWall(StudWallInput {
                label,
                length_m: a.length,
                height_m: a.height,
                centres_mm: a.centres,
                noggin_rows: a.noggin_rows,
                boarded_sides: a.sides,
                waste_percent: a.waste,
            }),
            Commands::Skirting(a) => CalculationItem::Skirting(SkirtingInput {
                label,
                perimeter_m: a.perimeter,
                doors: a.doors,
                door_width_m: a.door_width,
                stock_length_m: a.stock_length,
                waste_percent: a.waste,
            }),
            Commands::Cis(a) => CalculationItem::CisGrossToNet(CisGrossToNetInput {
                label,
                labour: a.labour,
                materials: a.materials,
                rate: CisRate::from_percent(a.rate)?,
                apply_vat: a.vat,
            }),
            Commands::CisGross(a) => CalculationItem::CisNetToGross(CisNetToGrossInput {
                label,
                net_labour: a.net,
                rate: CisRate::from_percent(a.rate)?,
            }),
            Commands::Prices | Commands::Formulas(_) | Commands::Jobs(_) => return Ok(None),
        };
        Ok(Some(item))
    }
}
