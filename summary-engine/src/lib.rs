//! FILENAME: summary-engine/src/lib.rs
//! Summary subsystem for activity-based costing.
//!
//! This crate derives the reporting views from the costed record collection,
//! separate from the costing engine. It depends on `costing` only for shared
//! types (CostedRecord, Dimensions, money formatting).
//!
//! Layers:
//! - `filter`: Optional criteria applied as an AND pipeline
//! - `engine`: Recomputes every view from the filtered set (HOW we derive)
//! - `view`: Numeric output tables for the frontend (WHAT we display)
//! - `display`: Currency-string formatting at the presentation boundary

pub mod display;
pub mod engine;
pub mod filter;
pub mod view;

pub use display::{
    detail_row_cells, reference_summary_cells, totals_cells, DETAIL_COLUMNS,
    REFERENCE_SUMMARY_COLUMNS,
};
pub use engine::summarize;
pub use filter::RecordFilter;
pub use view::{
    ActivityDetail, CostCenterDetail, CostCenterSlice, DetailRow, ExportTables, NameSummaryRow,
    ReferenceDetail, ReferenceSummaryRow, Summary, Totals,
};
