//! # Trade Formulas
//!
//! The closed-form arithmetic behind every calculator, kept in one place so
//! it can be checked against its source and printed as a reference table.
//!
//! ## Modules
//!
//! - [`electrical`] - Voltage drop, supply voltages, drop limits
//! - [`quantities`] - Waste-adjusted unit counts and geometry
//! - [`tax`] - CIS deduction and VAT
//! - [`registry`] - Formula metadata and markdown generation
//!
//! Functions here take and return plain `f64` and never validate. Input
//! checking happens once, in the calculators.

pub mod electrical;
pub mod quantities;
pub mod registry;
pub mod tax;

pub use electrical::{max_run_length_m, percent_of_supply, voltage_drop_volts};

pub use quantities::{
    members_at_centres,
    pitched_area,
    raw_units,
    rectangular_volume,
    round_up_units,
    rounded_units,
    waste_multiplier,
};

pub use tax::{cis_deduction, gross_from_net, net_of_cis, vat_on};

pub use registry::{
    formulas_for,
    generate_formulas_markdown,
    Formula,
    FormulaCategory,
    FormulaMetadata,
    Reference,
    Variable,
    ALL_FORMULAS,
};
