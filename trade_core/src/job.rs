//! # Saved Jobs
//!
//! A `SavedJob` is one calculation a tradesperson wants to keep: the inputs,
//! the results they were shown, and which price list priced them. Jobs are
//! collected in a `JobBook`, which serializes to a `.tcj` file as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! JobBook
//! ├── meta: JobBookMetadata (version, owner, timestamps)
//! └── jobs: HashMap<Uuid, SavedJob>
//! ```
//!
//! The `{calculatorType, inputs, results}` triple inside each job is the
//! save-job payload ([`SaveJobRequest`]); identity and timestamps are added
//! on save.
//!
//! ## Example
//!
//! ```rust
//! use trade_core::job::{JobBook, SavedJob};
//! use trade_core::calculations::{CalculationItem, CisGrossToNetInput, CisRate};
//! use trade_core::pricing::DEFAULT_PRICE_LIST;
//!
//! let mut book = JobBook::new("Dave's Roofing");
//!
//! let item = CalculationItem::CisGrossToNet(CisGrossToNetInput {
//!     label: "Invoice 104".to_string(),
//!     labour: 1000.0,
//!     materials: 200.0,
//!     rate: CisRate::Registered,
//!     apply_vat: false,
//! });
//!
//! let job = SavedJob::run(item, &DEFAULT_PRICE_LIST).unwrap();
//! let id = book.add_job(job);
//! assert!(book.jobs.contains_key(&id));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::{CalculationItem, CalculationOutcome, CalculatorKind};
use crate::errors::{CalcError, CalcResult};
use crate::pricing::PriceList;

/// Current schema version for .tcj files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// The save-job payload: which calculator, what went in, what came out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveJobRequest {
    pub calculator_type: CalculatorKind,
    pub inputs: CalculationItem,
    pub results: CalculationOutcome,
}

impl SaveJobRequest {
    /// Check that the declared type, inputs and results all agree.
    pub fn validate(&self) -> CalcResult<()> {
        if self.inputs.kind() != self.calculator_type {
            return Err(CalcError::invalid_input(
                "inputs",
                self.inputs.calc_type(),
                format!("Inputs do not match calculator type {}", self.calculator_type),
            ));
        }
        if self.results.kind() != self.calculator_type {
            return Err(CalcError::invalid_input(
                "results",
                self.results.kind().as_str(),
                format!("Results do not match calculator type {}", self.calculator_type),
            ));
        }
        Ok(())
    }
}

/// One saved calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedJob {
    pub id: Uuid,
    pub label: String,
    pub calculator_type: CalculatorKind,
    pub inputs: CalculationItem,
    pub results: CalculationOutcome,
    /// Price list version the results were priced against
    pub price_list_version: String,
    pub created: DateTime<Utc>,
}

impl SavedJob {
    /// Run a calculation and keep it.
    pub fn run(inputs: CalculationItem, prices: &PriceList) -> CalcResult<Self> {
        let results = inputs.calculate(prices)?;
        Ok(Self::record(inputs, results, &prices.version))
    }

    /// Accept a save-job payload whose results were worked out elsewhere.
    pub fn from_request(request: SaveJobRequest, price_list_version: impl Into<String>) -> CalcResult<Self> {
        request.validate()?;
        Ok(Self::record(request.inputs, request.results, &price_list_version.into()))
    }

    fn record(inputs: CalculationItem, results: CalculationOutcome, price_list_version: &str) -> Self {
        SavedJob {
            id: Uuid::new_v4(),
            label: inputs.label().to_string(),
            calculator_type: inputs.kind(),
            inputs,
            results,
            price_list_version: price_list_version.to_string(),
            created: Utc::now(),
        }
    }

    /// The payload form of this job
    pub fn to_request(&self) -> SaveJobRequest {
        SaveJobRequest {
            calculator_type: self.calculator_type,
            inputs: self.inputs.clone(),
            results: self.results.clone(),
        }
    }
}

/// Root container for saved jobs.
///
/// Jobs are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobBook {
    pub meta: JobBookMetadata,
    pub jobs: HashMap<Uuid, SavedJob>,
}

/// Job book metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobBookMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,
    /// Business or person the book belongs to
    pub owner: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl JobBook {
    pub fn new(owner: impl Into<String>) -> Self {
        let now = Utc::now();
        JobBook {
            meta: JobBookMetadata {
                version: SCHEMA_VERSION.to_string(),
                owner: owner.into(),
                created: now,
                modified: now,
            },
            jobs: HashMap::new(),
        }
    }

    /// Add a job, returning its id.
    pub fn add_job(&mut self, job: SavedJob) -> Uuid {
        let id = job.id;
        self.jobs.insert(id, job);
        self.touch();
        id
    }

    /// Remove a job by UUID.
    ///
    /// Returns the removed job if it existed.
    pub fn remove_job(&mut self, id: &Uuid) -> Option<SavedJob> {
        let job = self.jobs.remove(id);
        if job.is_some() {
            self.touch();
        }
        job
    }

    pub fn get_job(&self, id: &Uuid) -> Option<&SavedJob> {
        self.jobs.get(id)
    }

    /// Jobs for one calculator, oldest first.
    pub fn jobs_of_kind(&self, kind: CalculatorKind) -> Vec<&SavedJob> {
        let mut jobs: Vec<&SavedJob> = self.jobs.values().filter(|j| j.calculator_type == kind).collect();
        jobs.sort_by_key(|j| j.created);
        jobs
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for JobBook {
    fn default() -> Self {
        JobBook::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{BspLookupInput, BspQuery, QuantityInput};
    use crate::pricing::DEFAULT_PRICE_LIST;

    fn bsp_item() -> CalculationItem {
        CalculationItem::BspLookup(BspLookupInput {
            label: "Tap connector".to_string(),
            query: BspQuery::Diameter { measured_mm: 26.4 },
        })
    }

    #[test]
    fn test_run_records_job() {
        let job = SavedJob::run(bsp_item(), &DEFAULT_PRICE_LIST).unwrap();
        assert_eq!(job.label, "Tap connector");
        assert_eq!(job.calculator_type, CalculatorKind::BspLookup);
        assert_eq!(job.price_list_version, "2025-Q4");
    }

    #[test]
    fn test_payload_is_camel_case() {
        let job = SavedJob::run(bsp_item(), &DEFAULT_PRICE_LIST).unwrap();
        let json = serde_json::to_string(&job.to_request()).unwrap();
        assert!(json.contains("\"calculatorType\":\"bsp-lookup\""));
        assert!(json.contains("\"inputs\""));
        assert!(json.contains("\"results\""));

        let request: SaveJobRequest = serde_json::from_str(&json).unwrap();
        let again = SavedJob::from_request(request, "2025-Q4").unwrap();
        assert_ne!(again.id, job.id);
    }

    #[test]
    fn test_mismatched_payload_rejected() {
        let job = SavedJob::run(bsp_item(), &DEFAULT_PRICE_LIST).unwrap();
        let mut request = job.to_request();
        request.calculator_type = CalculatorKind::Concrete;
        assert!(SavedJob::from_request(request, "2025-Q4").is_err());
    }

    #[test]
    fn test_failed_calculation_not_saved() {
        let item = CalculationItem::Quantity(QuantityInput {
            label: "bad".to_string(),
            quantity: -1.0,
            coverage_per_unit: 1.0,
            waste_percent: 0.0,
            unit_name: "bag".to_string(),
        });
        assert!(SavedJob::run(item, &DEFAULT_PRICE_LIST).is_err());
    }

    #[test]
    fn test_add_remove_job() {
        let mut book = JobBook::new("Test Owner");
        let id = book.add_job(SavedJob::run(bsp_item(), &DEFAULT_PRICE_LIST).unwrap());
        assert_eq!(book.job_count(), 1);
        assert!(book.get_job(&id).is_some());
        assert_eq!(book.jobs_of_kind(CalculatorKind::BspLookup).len(), 1);
        assert!(book.jobs_of_kind(CalculatorKind::Tile).is_empty());

        assert!(book.remove_job(&id).is_some());
        assert_eq!(book.job_count(), 0);
        assert!(book.remove_job(&id).is_none());
    }

    #[test]
    fn test_book_serialization() {
        let mut book = JobBook::new("Acme Electrical");
        book.add_job(SavedJob::run(bsp_item(), &DEFAULT_PRICE_LIST).unwrap());
        let json = serde_json::to_string_pretty(&book).unwrap();
        assert!(json.contains("Acme Electrical"));

        let roundtrip: JobBook = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.owner, "Acme Electrical");
        assert_eq!(roundtrip.job_count(), 1);
    }
}
