//! FILENAME: summary-engine/src/view.rs
//! Summary View - Renderable output for the presentation layer.
//!
//! Every value here is numeric; currency-string formatting is applied by
//! the display helpers, never stored in a view.

use chrono::NaiveDate;
use costing::CostedRecord;
use serde::{Deserialize, Serialize};

// ============================================================================
// GLOBAL TOTALS
// ============================================================================

/// Headline figures over the filtered record set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Totals {
    /// Sum of `total_cost` over the filtered set.
    pub cost_sum: f64,

    /// Number of records in the filtered set.
    pub record_count: usize,

    /// Estimated real units: `sum(units) / record_count`, 0 when the set is
    /// empty. A per-record average, not a units total.
    pub real_units: f64,
}

// ============================================================================
// PER-REFERENCE SUMMARIES
// ============================================================================

/// One row of the per-reference summary table, grouped by reference code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceSummaryRow {
    pub reference_code: String,

    /// Carried from the first record of the group; assumes the code-to-name
    /// mapping is 1:1.
    pub reference_name: String,

    pub units_sum: u64,

    /// Number of costed records in the group.
    pub activity_count: usize,

    pub cost_sum: f64,

    /// `units_sum / activity_count`.
    pub real_units: f64,

    /// `cost_sum / real_units`.
    pub avg_unit_cost: f64,
}

/// One row of the graphing summary, independently grouped by reference name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameSummaryRow {
    pub reference_name: String,
    pub units_sum: u64,
    pub activity_count: usize,
    pub cost_sum: f64,
    pub real_units: f64,
    pub avg_unit_cost: f64,
}

// ============================================================================
// COST-CENTER DISTRIBUTION
// ============================================================================

/// Total cost attributed to one cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterSlice {
    pub cost_center_name: String,
    pub cost_sum: f64,
}

// ============================================================================
// DRILL-DOWN HIERARCHY
// ============================================================================

/// Per-record fields exposed at the drill-down leaf level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRow {
    pub date: NaiveDate,
    pub reference_code: String,
    pub units: u32,
    pub total_hours: f64,
    pub compressor_hours: f64,
    pub worker_cost: f64,
    pub compressor_cost: f64,
    pub total_cost: f64,
    pub unit_cost: f64,
    pub user: String,
    pub notes: String,
}

impl DetailRow {
    pub fn from_record(record: &CostedRecord) -> Self {
        DetailRow {
            date: record.date,
            reference_code: record.reference_code.clone(),
            units: record.units,
            total_hours: record.total_hours,
            compressor_hours: record.compressor_hours,
            worker_cost: record.worker_cost,
            compressor_cost: record.compressor_cost,
            total_cost: record.total_cost,
            unit_cost: record.unit_cost,
            user: record.user.clone(),
            notes: record.notes.clone(),
        }
    }
}

/// Detail rows for one reference within an activity/center pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceDetail {
    pub reference_name: String,
    pub rows: Vec<DetailRow>,
}

/// Activities within a cost center, each with its reference breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityDetail {
    pub activity_name: String,
    pub references: Vec<ReferenceDetail>,
}

/// Top level of the expandable detail view: one cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostCenterDetail {
    pub cost_center_name: String,
    pub activities: Vec<ActivityDetail>,
}

// ============================================================================
// COMPLETE SUMMARY
// ============================================================================

/// The full derived view set over one filtered record collection.
/// Recomputed from scratch on every invocation; holds no incremental state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Summary {
    pub totals: Totals,
    pub by_reference: Vec<ReferenceSummaryRow>,
    pub by_reference_name: Vec<NameSummaryRow>,
    pub cost_center_distribution: Vec<CostCenterSlice>,
    pub drill_down: Vec<CostCenterDetail>,

    /// The filtered record set the views were derived from, unmodified.
    pub records: Vec<CostedRecord>,
}

/// The export-ready pair of tables: the filtered records and the
/// per-reference summary, both numeric end to end.
#[derive(Debug, Clone, Copy)]
pub struct ExportTables<'a> {
    pub records: &'a [CostedRecord],
    pub reference_summary: &'a [ReferenceSummaryRow],
}

impl Summary {
    pub fn export_tables(&self) -> ExportTables<'_> {
        ExportTables {
            records: &self.records,
            reference_summary: &self.by_reference,
        }
    }
}
