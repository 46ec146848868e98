//! FILENAME: costing/src/error.rs

use thiserror::Error;

/// Lookup failures raised while costing an observation.
///
/// These are unrecoverable for the submission in question and must be
/// surfaced to the caller, never silently defaulted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CostingError {
    #[error("Unknown activity: {0}")]
    UnknownActivity(String),

    #[error("Unknown product reference: {0}")]
    UnknownReference(String),
}

/// Precondition violations caught before an observation reaches the engine.
///
/// The engine assumes validated input; callers reject these up front.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Units must be at least 1")]
    ZeroUnits,

    #[error("Worker count must be at least 1")]
    ZeroWorkers,

    #[error("Hours per worker must be finite and non-negative, got {0}")]
    InvalidWorkerHours(f64),

    #[error("Compressor hours must be finite and non-negative, got {0}")]
    InvalidCompressorHours(f64),
}

/// Errors building the dimension tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("Duplicate activity name: {0}")]
    DuplicateActivityName(String),

    #[error("Duplicate activity id: {0}")]
    DuplicateActivityId(u32),

    #[error("Duplicate product reference name: {0}")]
    DuplicateReferenceName(String),

    #[error("Duplicate product reference code: {0}")]
    DuplicateReferenceCode(String),

    #[error("Duplicate cost center id: {0}")]
    DuplicateCostCenterId(u32),
}
