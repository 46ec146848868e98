//! FILENAME: costing/src/observation.rs
//! One validated daily-activity observation, as supplied by the input form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A single observation of work performed: who did what, on which product,
/// for how long. Transient input to the costing engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub activity_name: String,
    pub reference_name: String,

    /// Units produced. At least 1.
    pub units: u32,

    /// Hours worked per worker.
    pub hours_per_worker: f64,

    /// Number of workers on the activity. At least 1.
    pub worker_count: u32,

    /// Compressor hours. Only meaningful for compressor-eligible activities;
    /// the engine zeroes it for all others.
    pub compressor_hours: f64,

    pub user: String,
    pub notes: String,
}

impl Observation {
    /// Checks the engine's preconditions. The costing engine assumes a
    /// validated observation and does not re-check these.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.units < 1 {
            return Err(ValidationError::ZeroUnits);
        }
        if self.worker_count < 1 {
            return Err(ValidationError::ZeroWorkers);
        }
        if !self.hours_per_worker.is_finite() || self.hours_per_worker < 0.0 {
            return Err(ValidationError::InvalidWorkerHours(self.hours_per_worker));
        }
        if !self.compressor_hours.is_finite() || self.compressor_hours < 0.0 {
            return Err(ValidationError::InvalidCompressorHours(
                self.compressor_hours,
            ));
        }
        Ok(())
    }
}
