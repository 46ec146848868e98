//! FILENAME: costing/src/rates.rs
//! Process-wide cost rates.
//!
//! The rate table is explicit configuration passed into the costing engine,
//! not ambient global state. `Default` carries the shop's current rates;
//! a deployment can override them from a JSON config file.

use serde::{Deserialize, Serialize};

/// Hourly and per-unit cost rates, immutable for the life of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    /// Cost of one worker-hour.
    pub worker_hourly: f64,

    /// Cost of one compressor-hour.
    pub compressor_hourly: f64,

    /// Flat packaging cost per unit packed.
    pub packaging_per_unit: f64,

    /// Flat material cost per fabrication batch (per record, not per unit).
    pub fabrication_material_per_batch: f64,
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable {
            worker_hourly: 10777.0,
            compressor_hourly: 6200.0,
            packaging_per_unit: 3500.0,
            fabrication_material_per_batch: 162500.0,
        }
    }
}

impl RateTable {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Option<Self> {
        serde_json::from_str(json).ok()
    }
}
