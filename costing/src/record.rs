//! FILENAME: costing/src/record.rs
//! PURPOSE: The costed record - one persisted, fully priced observation.
//! CONTEXT: Created exactly once per submission, appended to the store and
//! never updated or deleted. The column order below is the contract with the
//! persistence collaborator.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of columns in a persisted record row.
pub const COLUMN_COUNT: usize = 18;

/// Date format used at the persistence and display boundaries.
/// Dates are date values internally.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One priced observation of work performed.
///
/// Invariants:
/// - `total_hours == hours_per_worker * worker_count`
/// - `unit_cost == round2(total_cost / units)`
/// - `total_cost >= worker_cost + compressor_cost` (equality unless a
///   surcharge applied)
/// - `adjusted_units == units` at creation; reserved for later
///   consolidation, never mutated by the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostedRecord {
    pub date: NaiveDate,
    pub cost_center_id: u32,
    pub activity_id: u32,
    pub activity_name: String,
    pub reference_code: String,
    pub reference_name: String,
    pub units: u32,
    pub hours_per_worker: f64,
    pub worker_count: u32,
    pub total_hours: f64,
    pub compressor_hours: f64,
    pub user: String,
    pub notes: String,
    pub worker_cost: f64,
    pub compressor_cost: f64,
    pub total_cost: f64,
    pub unit_cost: f64,
    pub adjusted_units: u32,
}

impl CostedRecord {
    /// Store column headers, in the exact persisted order.
    pub const COLUMNS: [&'static str; COLUMN_COUNT] = [
        "Fecha",
        "CentroCosto_ID",
        "Actividad_ID",
        "N_Actividad",
        "Cod_Ref",
        "N_Referencia",
        "Unidades",
        "Horas_Trabajador",
        "Trabajadores",
        "Horas_Totales",
        "Horas_Compresor",
        "Usuario",
        "Observaciones",
        "Costo_Trabajador",
        "Costo_Compresor",
        "Costo_Total",
        "Costo_Unitario",
        "Unidades_Ajustadas",
    ];
}
