//! BSP Thread Dimensions
//!
//! British Standard Pipe (BSP) parallel thread sizes, 1/16" through 4",
//! per BS EN ISO 228-1 / BS 21. Dimensions are rounded to 0.01 mm, which is
//! as fine as anyone measures a fitting with a set of calipers.
//!
//! ## Identifying a Fitting
//!
//! Nominal size has nothing to do with any measurable dimension: a 1/2" BSP
//! thread is 20.96 mm across the crests. Identification goes by measured
//! outer diameter first and thread count second.

use serde::Serialize;

/// One row of the BSP thread table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BspThread {
    /// Nominal size designation (e.g., "1/2\"")
    pub nominal_size: &'static str,
    /// Major (crest) diameter in mm
    pub outer_diameter_mm: f64,
    /// Threads per inch
    pub threads_per_inch: u32,
    /// Thread pitch in mm
    pub pitch_mm: f64,
    /// Minor (root) diameter in mm
    pub inner_diameter_mm: f64,
}

impl BspThread {
    const fn new(
        nominal_size: &'static str,
        outer_diameter_mm: f64,
        threads_per_inch: u32,
        pitch_mm: f64,
        inner_diameter_mm: f64,
    ) -> Self {
        Self {
            nominal_size,
            outer_diameter_mm,
            threads_per_inch,
            pitch_mm,
            inner_diameter_mm,
        }
    }

    /// Depth of thread form (mm), half the difference of major and minor diameters
    pub fn thread_depth_mm(&self) -> f64 {
        (self.outer_diameter_mm - self.inner_diameter_mm) / 2.0
    }
}

impl std::fmt::Display for BspThread {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} BSP ({:.2} mm, {} TPI)",
            self.nominal_size, self.outer_diameter_mm, self.threads_per_inch
        )
    }
}

/// BSP parallel thread table in ascending size order.
///
/// Table order matters: nearest-diameter ties resolve to the earlier row.
pub const BSP_THREADS: [BspThread; 15] = [
    BspThread::new("1/16\"", 7.72, 28, 0.91, 6.56),
    BspThread::new("1/8\"", 9.73, 28, 0.91, 8.57),
    BspThread::new("1/4\"", 13.16, 19, 1.34, 11.45),
    BspThread::new("3/8\"", 16.66, 19, 1.34, 14.95),
    BspThread::new("1/2\"", 20.96, 14, 1.81, 18.63),
    BspThread::new("5/8\"", 22.91, 14, 1.81, 20.59),
    BspThread::new("3/4\"", 26.44, 14, 1.81, 24.12),
    BspThread::new("7/8\"", 30.20, 14, 1.81, 27.88),
    BspThread::new("1\"", 33.25, 11, 2.31, 30.29),
    BspThread::new("1-1/4\"", 41.91, 11, 2.31, 38.95),
    BspThread::new("1-1/2\"", 47.80, 11, 2.31, 44.85),
    BspThread::new("2\"", 59.61, 11, 2.31, 56.66),
    BspThread::new("2-1/2\"", 75.18, 11, 2.31, 72.23),
    BspThread::new("3\"", 87.88, 11, 2.31, 84.93),
    BspThread::new("4\"", 113.03, 11, 2.31, 110.07),
];
