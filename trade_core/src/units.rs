//! # Unit Types
//!
//! Type-safe wrappers for site units. These provide compile-time safety
//! against unit confusion while remaining lightweight (just f64 wrappers).
//!
//! ## Metric Units (Primary)
//!
//! UK trades quote in metric, with a couple of holdovers:
//! - Length: metres (m), millimetres (mm)
//! - Area: square metres (m²)
//! - Volume: cubic metres (m³), cubic yards (skip hire is still sold by the yard)
//! - Mass: kilograms (kg), tonnes (t)
//! - Money: pounds sterling (£)
//!
//! ## Example
//!
//! ```rust
//! use trade_core::units::{Metres, Millimetres};
//!
//! let spacing = Millimetres(600.0);
//! let spacing_m: Metres = spacing.into();
//! assert_eq!(spacing_m.0, 0.6);
//! ```

use serde::{Deserialize, Serialize};
use std::iter::Sum;
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metres(pub f64);

/// Length in millimetres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimetres(pub f64);

impl From<Metres> for Millimetres {
    fn from(m: Metres) -> Self {
        Millimetres(m.0 * 1000.0)
    }
}

impl From<Millimetres> for Metres {
    fn from(mm: Millimetres) -> Self {
        Metres(mm.0 / 1000.0)
    }
}

// ============================================================================
// Area and Volume Units
// ============================================================================

/// Area in square metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMetres(pub f64);

/// Volume in cubic metres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMetres(pub f64);

/// Volume in cubic yards
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicYards(pub f64);

/// 1 yd³ = 0.764555 m³
const CUBIC_METRES_PER_CUBIC_YARD: f64 = 0.764_555;

impl From<CubicMetres> for CubicYards {
    fn from(m3: CubicMetres) -> Self {
        CubicYards(m3.0 / CUBIC_METRES_PER_CUBIC_YARD)
    }
}

impl From<CubicYards> for CubicMetres {
    fn from(yd3: CubicYards) -> Self {
        CubicMetres(yd3.0 * CUBIC_METRES_PER_CUBIC_YARD)
    }
}

impl Metres {
    /// Area of a rectangle with this length and the given width
    pub fn by(self, width: Metres) -> SquareMetres {
        SquareMetres(self.0 * width.0)
    }
}

impl SquareMetres {
    /// Volume of a prism of this area and the given depth
    pub fn by(self, depth: Metres) -> CubicMetres {
        CubicMetres(self.0 * depth.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in metric tonnes (1000 kg)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tonnes(pub f64);

impl From<Kilograms> for Tonnes {
    fn from(kg: Kilograms) -> Self {
        Tonnes(kg.0 / 1000.0)
    }
}

impl From<Tonnes> for Kilograms {
    fn from(t: Tonnes) -> Self {
        Kilograms(t.0 * 1000.0)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Amount in pounds sterling
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gbp(pub f64);

impl Gbp {
    /// Round to the nearest penny (half away from zero)
    pub fn round_pence(self) -> Self {
        Gbp((self.0 * 100.0).round() / 100.0)
    }
}

impl std::fmt::Display for Gbp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = if self.0 < 0.0 {
            format!("-£{:.2}", -self.0)
        } else {
            format!("£{:.2}", self.0)
        };
        f.pad(&text)
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl Sum for $type {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                Self(iter.map(|v| v.0).sum())
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Metres);
impl_arithmetic!(Millimetres);
impl_arithmetic!(SquareMetres);
impl_arithmetic!(CubicMetres);
impl_arithmetic!(CubicYards);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Tonnes);
impl_arithmetic!(Gbp);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_millimetres_to_metres() {
        let mm = Millimetres(400.0);
        let m: Metres = mm.into();
        assert!((m.0 - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_cubic_metres_to_yards() {
        let skip: CubicMetres = CubicYards(8.0).into();
        assert!((skip.0 - 6.116).abs() < 0.001);
    }

    #[test]
    fn test_area_and_volume() {
        let area = Metres(4.0).by(Metres(2.5));
        assert_eq!(area.0, 10.0);
        let volume = area.by(Metres(0.1));
        assert!((volume.0 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_pence() {
        assert_eq!(Gbp(12.346).round_pence().0, 12.35);
        assert_eq!(Gbp(12.344).round_pence().0, 12.34);
        assert_eq!(format!("{}", Gbp(1000.0)), "£1000.00");
        assert_eq!(format!("{}", Gbp(-3.5)), "-£3.50");
    }

    #[test]
    fn test_arithmetic() {
        let a = Gbp(10.0);
        let b = Gbp(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_serialization() {
        let m = Metres(12.5);
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "12.5");

        let roundtrip: Metres = serde_json::from_str(&json).unwrap();
        assert_eq!(m, roundtrip);
    }
}
