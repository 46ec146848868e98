//! FILENAME: costing/src/lib.rs
//! PURPOSE: Main library entry point for the activity-based costing engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod dimensions;
pub mod engine;
pub mod error;
pub mod money;
pub mod observation;
pub mod rates;
pub mod record;

// Re-export commonly used types at the crate root
pub use dimensions::{
    Activity, CostCenter, Dimensions, Product, SurchargeKind, COMPRESSOR_ACTIVITY_MARKERS,
    FABRICATION_ACTIVITY, PACKAGING_ACTIVITY,
};
pub use engine::cost_observation;
pub use error::{CostingError, DimensionError, ValidationError};
pub use money::{format_amount, format_unit_cost, round2};
pub use observation::Observation;
pub use rates::RateTable;
pub use record::{CostedRecord, COLUMN_COUNT, DATE_FORMAT};
