//! FILENAME: persistence/src/lib.rs
//! Costing Persistence Module
//!
//! Handles the append-only record store and the reporting export, both as
//! XLSX workbooks. The store workbook carries the three dimension sheets
//! plus the daily record sheet; records are only ever appended, never
//! updated or deleted.

mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use xlsx_reader::load_workbook;
pub use xlsx_writer::{append_record, export_summary, save_workbook};

use chrono::NaiveDate;
use costing::{CostedRecord, Dimensions, DATE_FORMAT};

// ============================================================================
// STORE SHEET NAMES
// ============================================================================

pub const PRODUCTS_SHEET: &str = "productos";
pub const ACTIVITIES_SHEET: &str = "actividades";
pub const COST_CENTERS_SHEET: &str = "centros_costo";
pub const RECORDS_SHEET: &str = "registros_diarios";

/// Sheet names in the exported report workbook.
pub const EXPORT_DETAIL_SHEET: &str = "Detalle Actividades";
pub const EXPORT_SUMMARY_SHEET: &str = "Resumen Referencias";

// ============================================================================
// SHEET COLUMN HEADERS
// ============================================================================

pub const PRODUCT_COLUMNS: [&str; 2] = ["Cod_Ref", "N_Referencia"];
pub const ACTIVITY_COLUMNS: [&str; 3] = ["Actividad_ID", "N_Actividad", "CentroCosto_ID"];
pub const COST_CENTER_COLUMNS: [&str; 2] = ["CentroCosto_ID", "N_CentroCosto"];

/// Columns of the exported per-reference summary sheet.
pub const EXPORT_SUMMARY_COLUMNS: [&str; 7] = [
    "Cod_Ref",
    "N_Referencia",
    "Unidades",
    "N_Actividad",
    "Costo_Total",
    "Unidades_Reales",
    "Costo_Unitario_Promedio",
];

// ============================================================================
// STORE DATA
// ============================================================================

/// Everything the store workbook holds: the read-only dimension tables and
/// the full record collection.
#[derive(Debug, Clone)]
pub struct StoreData {
    pub dimensions: Dimensions,
    pub records: Vec<CostedRecord>,
}

// ============================================================================
// DATE CODEC
// ============================================================================

/// Parses a store-format date (`dd/mm/yyyy`).
pub fn parse_store_date(text: &str) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| PersistenceError::InvalidFormat(format!("Invalid date: '{}'", text)))
}

/// Formats a date in the store format (`dd/mm/yyyy`).
pub fn format_store_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_codec_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
        let text = format_store_date(date);
        assert_eq!(text, "14/05/2024");
        assert_eq!(parse_store_date(&text).unwrap(), date);
    }

    #[test]
    fn test_date_codec_rejects_malformed_input() {
        assert!(parse_store_date("2024-05-14").is_err());
        assert!(parse_store_date("32/13/2024").is_err());
        assert!(parse_store_date("").is_err());
    }
}
