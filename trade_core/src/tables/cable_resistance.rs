//! Cable Conductor Resistance
//!
//! Copper conductor resistance per metre at 20 °C for the cross-sections a
//! domestic or light commercial installer actually stocks. These are the
//! conductor values behind the BS 7671 Appendix 4 Table 4D1B voltage drop
//! figures (the tabulated mV/A/m is the loop, i.e. roughly twice these).
//!
//! | Size (mm²) | mΩ/m |
//! |-----------:|-----:|
//! | 1.0  | 18.1  |
//! | 1.5  | 12.1  |
//! | 2.5  | 7.41  |
//! | 4    | 4.61  |
//! | 6    | 3.08  |
//! | 10   | 1.83  |
//! | 16   | 1.15  |
//! | 25   | 0.727 |
//! | 35   | 0.524 |
//! | 50   | 0.387 |

use serde::{Deserialize, Serialize};

/// Standard cable conductor cross-section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum CableSize {
    #[serde(rename = "1.0")]
    Mm1_0,
    #[serde(rename = "1.5")]
    Mm1_5,
    #[default]
    #[serde(rename = "2.5")]
    Mm2_5,
    #[serde(rename = "4")]
    Mm4,
    #[serde(rename = "6")]
    Mm6,
    #[serde(rename = "10")]
    Mm10,
    #[serde(rename = "16")]
    Mm16,
    #[serde(rename = "25")]
    Mm25,
    #[serde(rename = "35")]
    Mm35,
    #[serde(rename = "50")]
    Mm50,
}

impl CableSize {
    /// All sizes, smallest first
    pub const ALL: [CableSize; 10] = [
        CableSize::Mm1_0,
        CableSize::Mm1_5,
        CableSize::Mm2_5,
        CableSize::Mm4,
        CableSize::Mm6,
        CableSize::Mm10,
        CableSize::Mm16,
        CableSize::Mm25,
        CableSize::Mm35,
        CableSize::Mm50,
    ];

    /// Conductor cross-section in mm²
    pub fn cross_section_mm2(&self) -> f64 {
        match self {
            CableSize::Mm1_0 => 1.0,
            CableSize::Mm1_5 => 1.5,
            CableSize::Mm2_5 => 2.5,
            CableSize::Mm4 => 4.0,
            CableSize::Mm6 => 6.0,
            CableSize::Mm10 => 10.0,
            CableSize::Mm16 => 16.0,
            CableSize::Mm25 => 25.0,
            CableSize::Mm35 => 35.0,
            CableSize::Mm50 => 50.0,
        }
    }

    /// Conductor resistance in milliohms per metre
    pub fn resistance_mohm_per_m(&self) -> f64 {
        match self {
            CableSize::Mm1_0 => 18.1,
            CableSize::Mm1_5 => 12.1,
            CableSize::Mm2_5 => 7.41,
            CableSize::Mm4 => 4.61,
            CableSize::Mm6 => 3.08,
            CableSize::Mm10 => 1.83,
            CableSize::Mm16 => 1.15,
            CableSize::Mm25 => 0.727,
            CableSize::Mm35 => 0.524,
            CableSize::Mm50 => 0.387,
        }
    }

    /// Conductor resistance in ohms per metre
    pub fn resistance_ohm_per_m(&self) -> f64 {
        self.resistance_mohm_per_m() / 1000.0
    }

    /// Exact match on cross-section. Returns `None` for sizes not in the table.
    pub fn from_mm2(cross_section_mm2: f64) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|s| (s.cross_section_mm2() - cross_section_mm2).abs() < 1e-9)
    }

    /// The next size up, if any
    pub fn next_larger(&self) -> Option<Self> {
        let idx = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Get display name (e.g., "2.5mm²")
    pub fn display_name(&self) -> &'static str {
        match self {
            CableSize::Mm1_0 => "1.0mm²",
            CableSize::Mm1_5 => "1.5mm²",
            CableSize::Mm2_5 => "2.5mm²",
            CableSize::Mm4 => "4mm²",
            CableSize::Mm6 => "6mm²",
            CableSize::Mm10 => "10mm²",
            CableSize::Mm16 => "16mm²",
            CableSize::Mm25 => "25mm²",
            CableSize::Mm35 => "35mm²",
            CableSize::Mm50 => "50mm²",
        }
    }
}

impl std::fmt::Display for CableSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
