//! # trade_core - UK Trade Calculation Engine
//!
//! `trade_core` is the computational heart of TradeCalc: the sums an
//! electrician, plumber, builder or roofer does on site, with typed inputs
//! and results that serialize cleanly to JSON.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit Prices**: Anything costed takes a versioned [`pricing::PriceList`]
//!
//! ## Quick Start
//!
//! ```rust
//! use trade_core::calculations::{CalculationItem, CircuitClass, Phase, VoltageDropInput};
//! use trade_core::pricing::DEFAULT_PRICE_LIST;
//!
//! let item = CalculationItem::VoltageDrop(VoltageDropInput {
//!     label: "Garage radial".to_string(),
//!     current_a: 20.0,
//!     length_m: 10.0,
//!     cable_mm2: 2.5,
//!     circuit: CircuitClass::Power,
//!     phase: Phase::Single,
//! });
//!
//! let outcome = item.calculate(&DEFAULT_PRICE_LIST).unwrap();
//! let json = serde_json::to_string_pretty(&outcome).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Every calculator, plus the tagged input/result enums
//! - [`tables`] - BSP thread and cable resistance reference data
//! - [`formulas`] - The underlying formulas and their reference registry
//! - [`pricing`] - Versioned price list, TOML-overridable
//! - [`quote`] - Priced line items and summaries
//! - [`job`] - Saved jobs and job books
//! - [`file_io`] - Job book files with atomic saves and locking
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
#[cfg(not(target_arch = "wasm32"))]
pub mod file_io;
pub mod formulas;
pub mod job;
pub mod pricing;
pub mod quote;
pub mod tables;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutcome, CalculatorKind};
pub use errors::{CalcError, CalcResult};
#[cfg(not(target_arch = "wasm32"))]
pub use file_io::{load_job_book, save_job_book, FileLock};
pub use job::{JobBook, SaveJobRequest, SavedJob};
pub use pricing::{PriceList, DEFAULT_PRICE_LIST};
pub use quote::{Quote, QuoteLine, QuoteSummary};
