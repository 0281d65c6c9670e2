//! # Reference Tables
//!
//! Static, immutable lookup data shared by the calculators.
//!
//! - [`bsp_threads`] - BSP parallel pipe thread dimensions
//! - [`cable_resistance`] - Copper conductor resistance by cross-section

pub mod bsp_threads;
pub mod cable_resistance;

pub use bsp_threads::{BspThread, BSP_THREADS};
pub use cable_resistance::CableSize;
