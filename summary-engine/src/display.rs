//! FILENAME: summary-engine/src/display.rs
//! Display formatting for the presentation layer.
//!
//! Views stay numeric; these helpers turn view rows into currency-formatted
//! string cells for tables and the expandable detail view. Nothing here is
//! ever parsed back - numeric exports read the views directly.

use costing::{format_amount, format_unit_cost, DATE_FORMAT};

use crate::view::{DetailRow, ReferenceSummaryRow, Totals};

/// Column headers for the drill-down leaf table.
pub const DETAIL_COLUMNS: [&str; 11] = [
    "Fecha",
    "Cod_Ref",
    "Unidades",
    "Horas_Totales",
    "Horas_Compresor",
    "Costo_Trabajador",
    "Costo_Compresor",
    "Costo_Total",
    "Costo_Unitario",
    "Usuario",
    "Observaciones",
];

/// Column headers for the per-reference summary table.
pub const REFERENCE_SUMMARY_COLUMNS: [&str; 5] = [
    "Cod_Ref",
    "N_Referencia",
    "Unidades_Reales",
    "Costo_Total",
    "Costo_Unitario_Promedio",
];

/// Formats one drill-down leaf row. Amounts carry no decimals, unit cost
/// carries two.
pub fn detail_row_cells(row: &DetailRow) -> Vec<String> {
    vec![
        row.date.format(DATE_FORMAT).to_string(),
        row.reference_code.clone(),
        row.units.to_string(),
        format!("{:.2}", row.total_hours),
        format!("{:.2}", row.compressor_hours),
        format_amount(row.worker_cost),
        format_amount(row.compressor_cost),
        format_amount(row.total_cost),
        format_unit_cost(row.unit_cost),
        row.user.clone(),
        row.notes.clone(),
    ]
}

/// Formats one per-reference summary row for the summary table.
pub fn reference_summary_cells(row: &ReferenceSummaryRow) -> Vec<String> {
    vec![
        row.reference_code.clone(),
        row.reference_name.clone(),
        format!("{:.2}", row.real_units),
        format_amount(row.cost_sum),
        format_unit_cost(row.avg_unit_cost),
    ]
}

/// Formats the headline totals: cost sum, record count, real units.
pub fn totals_cells(totals: &Totals) -> [String; 3] {
    [
        format_amount(totals.cost_sum),
        totals.record_count.to_string(),
        format!("{:.2}", totals.real_units),
    ]
}
