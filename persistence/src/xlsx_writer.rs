//! FILENAME: persistence/src/xlsx_writer.rs
//! Writes the store workbook and the two-sheet reporting export.
//!
//! XLSX has no in-place append, so appending a record rewrites the store
//! file whole; existing rows are carried over untouched, never updated or
//! deleted.

use crate::{
    format_store_date, PersistenceError, StoreData, ACTIVITIES_SHEET, ACTIVITY_COLUMNS,
    COST_CENTERS_SHEET, COST_CENTER_COLUMNS, EXPORT_DETAIL_SHEET, EXPORT_SUMMARY_COLUMNS,
    EXPORT_SUMMARY_SHEET, PRODUCTS_SHEET, PRODUCT_COLUMNS, RECORDS_SHEET,
};
use costing::CostedRecord;
use log::info;
use rust_xlsxwriter::{Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;
use summary_engine::Summary;

/// Writes the full store workbook: the three dimension sheets plus the
/// record sheet, in the 18-column record order.
pub fn save_workbook(store: &StoreData, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();

    let products = xlsx.add_worksheet();
    products.set_name(PRODUCTS_SHEET)?;
    write_headers(products, &PRODUCT_COLUMNS)?;
    for (i, product) in store.dimensions.products().iter().enumerate() {
        let row = (i + 1) as u32;
        products.write_string(row, 0, product.reference_code.as_str())?;
        products.write_string(row, 1, product.reference_name.as_str())?;
    }

    let activities = xlsx.add_worksheet();
    activities.set_name(ACTIVITIES_SHEET)?;
    write_headers(activities, &ACTIVITY_COLUMNS)?;
    for (i, activity) in store.dimensions.activities().iter().enumerate() {
        let row = (i + 1) as u32;
        activities.write_number(row, 0, activity.activity_id as f64)?;
        activities.write_string(row, 1, activity.activity_name.as_str())?;
        activities.write_number(row, 2, activity.cost_center_id as f64)?;
    }

    let centers = xlsx.add_worksheet();
    centers.set_name(COST_CENTERS_SHEET)?;
    write_headers(centers, &COST_CENTER_COLUMNS)?;
    for (i, center) in store.dimensions.cost_centers().iter().enumerate() {
        let row = (i + 1) as u32;
        centers.write_number(row, 0, center.cost_center_id as f64)?;
        centers.write_string(row, 1, center.cost_center_name.as_str())?;
    }

    let records = xlsx.add_worksheet();
    records.set_name(RECORDS_SHEET)?;
    write_headers(records, &CostedRecord::COLUMNS)?;
    for (i, record) in store.records.iter().enumerate() {
        write_record_row(records, (i + 1) as u32, record)?;
    }

    xlsx.save(path)?;
    info!(
        "Saved store to {:?}: {} records",
        path,
        store.records.len()
    );
    Ok(())
}

/// Appends one costed record to the store file. The record collection is
/// append-only; this is the only mutation the store ever sees.
pub fn append_record(path: &Path, record: &CostedRecord) -> Result<(), PersistenceError> {
    let mut store = crate::load_workbook(path)?;
    store.records.push(record.clone());
    save_workbook(&store, path)?;
    info!(
        "Appended record for '{}' / '{}' ({} records stored)",
        record.activity_name,
        record.reference_name,
        store.records.len()
    );
    Ok(())
}

/// Writes the reporting export: the filtered record set and the
/// per-reference summary, as two sheets of numeric cells.
pub fn export_summary(summary: &Summary, path: &Path) -> Result<(), PersistenceError> {
    let tables = summary.export_tables();
    let mut xlsx = XlsxWorkbook::new();

    let detail = xlsx.add_worksheet();
    detail.set_name(EXPORT_DETAIL_SHEET)?;
    write_headers(detail, &CostedRecord::COLUMNS)?;
    for (i, record) in tables.records.iter().enumerate() {
        write_record_row(detail, (i + 1) as u32, record)?;
    }

    let resumen = xlsx.add_worksheet();
    resumen.set_name(EXPORT_SUMMARY_SHEET)?;
    write_headers(resumen, &EXPORT_SUMMARY_COLUMNS)?;
    for (i, row) in tables.reference_summary.iter().enumerate() {
        let r = (i + 1) as u32;
        resumen.write_string(r, 0, row.reference_code.as_str())?;
        resumen.write_string(r, 1, row.reference_name.as_str())?;
        resumen.write_number(r, 2, row.units_sum as f64)?;
        resumen.write_number(r, 3, row.activity_count as f64)?;
        resumen.write_number(r, 4, row.cost_sum)?;
        resumen.write_number(r, 5, row.real_units)?;
        resumen.write_number(r, 6, row.avg_unit_cost)?;
    }

    xlsx.save(path)?;
    info!(
        "Exported {} detail rows and {} summary rows to {:?}",
        tables.records.len(),
        tables.reference_summary.len(),
        path
    );
    Ok(())
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str]) -> Result<(), PersistenceError> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    Ok(())
}

fn write_record_row(
    worksheet: &mut Worksheet,
    row: u32,
    record: &CostedRecord,
) -> Result<(), PersistenceError> {
    worksheet.write_string(row, 0, format_store_date(record.date))?;
    worksheet.write_number(row, 1, record.cost_center_id as f64)?;
    worksheet.write_number(row, 2, record.activity_id as f64)?;
    worksheet.write_string(row, 3, record.activity_name.as_str())?;
    worksheet.write_string(row, 4, record.reference_code.as_str())?;
    worksheet.write_string(row, 5, record.reference_name.as_str())?;
    worksheet.write_number(row, 6, record.units as f64)?;
    worksheet.write_number(row, 7, record.hours_per_worker)?;
    worksheet.write_number(row, 8, record.worker_count as f64)?;
    worksheet.write_number(row, 9, record.total_hours)?;
    worksheet.write_number(row, 10, record.compressor_hours)?;
    worksheet.write_string(row, 11, record.user.as_str())?;
    worksheet.write_string(row, 12, record.notes.as_str())?;
    worksheet.write_number(row, 13, record.worker_cost)?;
    worksheet.write_number(row, 14, record.compressor_cost)?;
    worksheet.write_number(row, 15, record.total_cost)?;
    worksheet.write_number(row, 16, record.unit_cost)?;
    worksheet.write_number(row, 17, record.adjusted_units as f64)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_workbook;
    use calamine::{open_workbook, Reader, Xlsx};
    use chrono::NaiveDate;
    use costing::{
        cost_observation, Activity, CostCenter, Dimensions, Observation, Product, RateTable,
    };
    use summary_engine::{summarize, RecordFilter};
    use tempfile::tempdir;

    fn test_dimensions() -> Dimensions {
        Dimensions::new(
            vec![
                Product {
                    reference_code: "R001".to_string(),
                    reference_name: "Virgen del Carmen 30cm".to_string(),
                },
                Product {
                    reference_code: "R002".to_string(),
                    reference_name: "San Miguel 45cm".to_string(),
                },
            ],
            vec![
                Activity::classified(1, "Corte".to_string(), 1),
                Activity::classified(2, "Pulida".to_string(), 2),
                Activity::classified(4, "Empaque".to_string(), 3),
            ],
            vec![
                CostCenter {
                    cost_center_id: 1,
                    cost_center_name: "Fabricación".to_string(),
                },
                CostCenter {
                    cost_center_id: 2,
                    cost_center_name: "Acabado".to_string(),
                },
                CostCenter {
                    cost_center_id: 3,
                    cost_center_name: "Terminado".to_string(),
                },
            ],
        )
        .unwrap()
    }

    fn record(dims: &Dimensions, activity: &str, units: u32) -> costing::CostedRecord {
        let obs = Observation {
            date: NaiveDate::from_ymd_opt(2024, 5, 14).unwrap(),
            activity_name: activity.to_string(),
            reference_name: "Virgen del Carmen 30cm".to_string(),
            units,
            hours_per_worker: 2.0,
            worker_count: 1,
            compressor_hours: 0.0,
            user: "sandra".to_string(),
            notes: "lote 3".to_string(),
        };
        cost_observation(&obs, dims, &RateTable::default()).unwrap()
    }

    fn test_store() -> StoreData {
        let dimensions = test_dimensions();
        let records = vec![
            record(&dimensions, "Empaque", 100),
            record(&dimensions, "Corte", 50),
        ];
        StoreData {
            dimensions,
            records,
        }
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("costeo.xlsx");

        let store = test_store();
        save_workbook(&store, &path).unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded.records, store.records);
        assert_eq!(loaded.dimensions.products(), store.dimensions.products());
        assert_eq!(
            loaded.dimensions.activities(),
            store.dimensions.activities()
        );
        assert_eq!(
            loaded.dimensions.cost_centers(),
            store.dimensions.cost_centers()
        );
    }

    #[test]
    fn test_append_record_keeps_existing_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("costeo.xlsx");

        let store = test_store();
        save_workbook(&store, &path).unwrap();

        let new_record = record(&store.dimensions, "Pulida", 20);
        append_record(&path, &new_record).unwrap();

        let loaded = load_workbook(&path).unwrap();
        assert_eq!(loaded.records.len(), 3);
        assert_eq!(loaded.records[..2], store.records[..]);
        assert_eq!(loaded.records[2], new_record);
    }

    #[test]
    fn test_missing_sheet_is_reported() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");

        // A workbook with none of the store sheets.
        let mut xlsx = XlsxWorkbook::new();
        xlsx.add_worksheet().set_name("otra").unwrap();
        xlsx.save(&path).unwrap();

        let err = load_workbook(&path).unwrap_err();
        assert!(matches!(err, PersistenceError::SheetNotFound(_)));
    }

    #[test]
    fn test_export_summary_writes_two_sheets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("resumen_costeo_ABC.xlsx");

        let store = test_store();
        let summary = summarize(&store.records, &store.dimensions, &RecordFilter::all());
        export_summary(&summary, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let names = workbook.sheet_names().to_vec();
        assert_eq!(names, [EXPORT_DETAIL_SHEET, EXPORT_SUMMARY_SHEET]);

        let detail = workbook.worksheet_range(EXPORT_DETAIL_SHEET).unwrap();
        // Header row plus one row per filtered record.
        assert_eq!(detail.rows().count(), 1 + store.records.len());

        let resumen = workbook.worksheet_range(EXPORT_SUMMARY_SHEET).unwrap();
        // Both test records share one reference.
        assert_eq!(resumen.rows().count(), 2);
    }
}
