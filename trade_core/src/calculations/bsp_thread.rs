//! # BSP Thread Identification
//!
//! Identify a BSP fitting from a caliper reading across the thread crests, or
//! list the candidates for a counted thread pitch.
//!
//! ## Example
//!
//! ```rust
//! use trade_core::calculations::bsp_thread::{find_by_diameter, find_by_tpi};
//!
//! let thread = find_by_diameter(20.9);
//! assert_eq!(thread.nominal_size, "1/2\"");
//!
//! let fine = find_by_tpi(28);
//! assert_eq!(fine.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::tables::bsp_threads::{BspThread, BSP_THREADS};

/// What was measured on the fitting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum BspQuery {
    /// Outer diameter across the crests, mm
    Diameter { measured_mm: f64 },
    /// Threads counted over one inch
    Tpi { tpi: u32 },
}

/// Input for a BSP lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BspLookupInput {
    pub label: String,
    pub query: BspQuery,
}

/// Owned copy of a table row, for results that outlive the table borrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadMatch {
    pub nominal_size: String,
    pub outer_diameter_mm: f64,
    pub threads_per_inch: u32,
    pub pitch_mm: f64,
    pub inner_diameter_mm: f64,
    pub thread_depth_mm: f64,
}

impl From<&BspThread> for ThreadMatch {
    fn from(t: &BspThread) -> Self {
        ThreadMatch {
            nominal_size: t.nominal_size.to_string(),
            outer_diameter_mm: t.outer_diameter_mm,
            threads_per_inch: t.threads_per_inch,
            pitch_mm: t.pitch_mm,
            inner_diameter_mm: t.inner_diameter_mm,
            thread_depth_mm: t.thread_depth_mm(),
        }
    }
}

/// Result of a BSP lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum BspLookupResult {
    /// Nearest thread to a measured diameter
    Diameter {
        thread: ThreadMatch,
        measured_mm: f64,
        /// |OD - measured|
        tolerance_mm: f64,
    },
    /// Every thread with the counted TPI (may be empty)
    Tpi { tpi: u32, matches: Vec<ThreadMatch> },
}

/// Nearest thread by outer diameter. Ties go to the earlier (smaller) row.
pub fn find_by_diameter(measured_mm: f64) -> &'static BspThread {
    let mut best = &BSP_THREADS[0];
    let mut best_diff = (best.outer_diameter_mm - measured_mm).abs();
    for thread in BSP_THREADS.iter().skip(1) {
        let diff = (thread.outer_diameter_mm - measured_mm).abs();
        if diff < best_diff {
            best = thread;
            best_diff = diff;
        }
    }
    best
}

/// All threads with exactly this TPI. Empty when nothing matches.
pub fn find_by_tpi(tpi: u32) -> Vec<&'static BspThread> {
    BSP_THREADS.iter().filter(|t| t.threads_per_inch == tpi).collect()
}

/// Run a BSP lookup.
pub fn calculate(input: &BspLookupInput) -> CalcResult<BspLookupResult> {
    match input.query {
        BspQuery::Diameter { measured_mm } => {
            require_positive("measured_mm", measured_mm)?;
            let thread = find_by_diameter(measured_mm);
            let tolerance_mm = (thread.outer_diameter_mm - measured_mm).abs();
            debug!(measured_mm, %thread, tolerance_mm, "bsp diameter lookup");
            Ok(BspLookupResult::Diameter {
                thread: thread.into(),
                measured_mm,
                tolerance_mm,
            })
        }
        BspQuery::Tpi { tpi } => {
            if tpi == 0 {
                return Err(CalcError::invalid_input("tpi", "0", "Thread count must be at least 1"));
            }
            let matches: Vec<ThreadMatch> = find_by_tpi(tpi).into_iter().map(ThreadMatch::from).collect();
            debug!(tpi, matches = matches.len(), "bsp tpi lookup");
            Ok(BspLookupResult::Tpi { tpi, matches })
        }
    }
}
