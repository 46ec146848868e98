//! FILENAME: persistence/src/xlsx_reader.rs
//! Loads the store workbook: three dimension sheets plus the record sheet.
//!
//! Sheets are header-keyed; column order inside a dimension sheet does not
//! matter, only the header names do. The record sheet must carry all 18
//! record columns. Activity rows get their compressor/surcharge tags
//! derived from the activity name on load.

use crate::{
    parse_store_date, PersistenceError, StoreData, ACTIVITIES_SHEET, ACTIVITY_COLUMNS,
    COST_CENTERS_SHEET, COST_CENTER_COLUMNS, PRODUCTS_SHEET, PRODUCT_COLUMNS, RECORDS_SHEET,
};
use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{Duration, NaiveDate};
use costing::{Activity, CostCenter, CostedRecord, Dimensions, Product};
use log::info;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::path::Path;

static EMPTY_CELL: Data = Data::Empty;

/// Loads the full store: dimensions and the record collection.
pub fn load_workbook(path: &Path) -> Result<StoreData, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    let products = read_products(&mut workbook, &sheet_names)?;
    let activities = read_activities(&mut workbook, &sheet_names)?;
    let cost_centers = read_cost_centers(&mut workbook, &sheet_names)?;
    let dimensions = Dimensions::new(products, activities, cost_centers)?;

    let records = read_records(&mut workbook, &sheet_names)?;

    info!(
        "Loaded store from {:?}: {} records, {} products, {} activities, {} cost centers",
        path,
        records.len(),
        dimensions.products().len(),
        dimensions.activities().len(),
        dimensions.cost_centers().len()
    );

    Ok(StoreData {
        dimensions,
        records,
    })
}

// ============================================================================
// SHEET TABLES
// ============================================================================

/// One sheet read as a header-indexed table. Fully empty rows are skipped.
struct SheetTable {
    name: String,
    columns: HashMap<String, usize>,
    rows: Vec<Vec<Data>>,
}

impl SheetTable {
    fn column(&self, header: &str) -> Result<usize, PersistenceError> {
        self.columns.get(header).copied().ok_or_else(|| {
            PersistenceError::InvalidFormat(format!(
                "Sheet '{}' is missing column '{}'",
                self.name, header
            ))
        })
    }
}

fn read_table<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    sheet_names: &[String],
    name: &str,
) -> Result<SheetTable, PersistenceError> {
    if !sheet_names.iter().any(|s| s == name) {
        return Err(PersistenceError::SheetNotFound(name.to_string()));
    }

    let range = workbook
        .worksheet_range(name)
        .map_err(|e| PersistenceError::InvalidFormat(e.to_string()))?;

    let mut rows_iter = range.rows();
    let header_row = rows_iter.next().ok_or_else(|| {
        PersistenceError::InvalidFormat(format!("Sheet '{}' has no header row", name))
    })?;

    let mut columns = HashMap::new();
    for (i, cell) in header_row.iter().enumerate() {
        if let Data::String(s) = cell {
            columns.insert(s.trim().to_string(), i);
        }
    }

    let rows = rows_iter
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| row.to_vec())
        .collect();

    Ok(SheetTable {
        name: name.to_string(),
        columns,
        rows,
    })
}

fn cell(row: &[Data], idx: usize) -> &Data {
    row.get(idx).unwrap_or(&EMPTY_CELL)
}

// ============================================================================
// CELL CONVERSIONS
// ============================================================================

fn text_value(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        _ => String::new(),
    }
}

fn number_value(cell: &Data, sheet: &str, column: &str) -> Result<f64, PersistenceError> {
    match cell {
        Data::Float(f) => Ok(*f),
        Data::Int(i) => Ok(*i as f64),
        Data::String(s) => s.trim().parse::<f64>().map_err(|_| {
            PersistenceError::InvalidFormat(format!(
                "Sheet '{}': column '{}' holds non-numeric text '{}'",
                sheet, column, s
            ))
        }),
        other => Err(PersistenceError::InvalidFormat(format!(
            "Sheet '{}': column '{}' holds a non-numeric value ({:?})",
            sheet, column, other
        ))),
    }
}

fn id_value(cell: &Data, sheet: &str, column: &str) -> Result<u32, PersistenceError> {
    let number = number_value(cell, sheet, column)?;
    if number < 0.0 || number.fract() != 0.0 {
        return Err(PersistenceError::InvalidFormat(format!(
            "Sheet '{}': column '{}' holds {} where a non-negative integer was expected",
            sheet, column, number
        )));
    }
    Ok(number as u32)
}

fn date_value(cell: &Data, sheet: &str) -> Result<NaiveDate, PersistenceError> {
    match cell {
        Data::String(s) => parse_store_date(s),
        Data::DateTime(dt) => excel_serial_to_date(dt.as_f64()),
        other => Err(PersistenceError::InvalidFormat(format!(
            "Sheet '{}': expected a date, got {:?}",
            sheet, other
        ))),
    }
}

/// Excel serial dates count days from 1899-12-30.
fn excel_serial_to_date(serial: f64) -> Result<NaiveDate, PersistenceError> {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|base| base.checked_add_signed(Duration::days(serial.trunc() as i64)))
        .ok_or_else(|| {
            PersistenceError::InvalidFormat(format!("Date serial out of range: {}", serial))
        })
}

// ============================================================================
// DIMENSION SHEETS
// ============================================================================

fn read_products<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    sheet_names: &[String],
) -> Result<Vec<Product>, PersistenceError> {
    let table = read_table(workbook, sheet_names, PRODUCTS_SHEET)?;
    let code_col = table.column(PRODUCT_COLUMNS[0])?;
    let name_col = table.column(PRODUCT_COLUMNS[1])?;

    Ok(table
        .rows
        .iter()
        .map(|row| Product {
            reference_code: text_value(cell(row, code_col)),
            reference_name: text_value(cell(row, name_col)),
        })
        .collect())
}

fn read_activities<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    sheet_names: &[String],
) -> Result<Vec<Activity>, PersistenceError> {
    let table = read_table(workbook, sheet_names, ACTIVITIES_SHEET)?;
    let id_col = table.column(ACTIVITY_COLUMNS[0])?;
    let name_col = table.column(ACTIVITY_COLUMNS[1])?;
    let center_col = table.column(ACTIVITY_COLUMNS[2])?;

    let mut activities = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let activity_id = id_value(cell(row, id_col), ACTIVITIES_SHEET, ACTIVITY_COLUMNS[0])?;
        let cost_center_id =
            id_value(cell(row, center_col), ACTIVITIES_SHEET, ACTIVITY_COLUMNS[2])?;
        activities.push(Activity::classified(
            activity_id,
            text_value(cell(row, name_col)),
            cost_center_id,
        ));
    }
    Ok(activities)
}

fn read_cost_centers<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    sheet_names: &[String],
) -> Result<Vec<CostCenter>, PersistenceError> {
    let table = read_table(workbook, sheet_names, COST_CENTERS_SHEET)?;
    let id_col = table.column(COST_CENTER_COLUMNS[0])?;
    let name_col = table.column(COST_CENTER_COLUMNS[1])?;

    let mut centers = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        centers.push(CostCenter {
            cost_center_id: id_value(
                cell(row, id_col),
                COST_CENTERS_SHEET,
                COST_CENTER_COLUMNS[0],
            )?,
            cost_center_name: text_value(cell(row, name_col)),
        });
    }
    Ok(centers)
}

// ============================================================================
// RECORD SHEET
// ============================================================================

fn read_records<R: Read + Seek>(
    workbook: &mut Xlsx<R>,
    sheet_names: &[String],
) -> Result<Vec<CostedRecord>, PersistenceError> {
    let table = read_table(workbook, sheet_names, RECORDS_SHEET)?;

    // Resolve all 18 column positions up front.
    let mut cols = [0usize; costing::COLUMN_COUNT];
    for (i, header) in CostedRecord::COLUMNS.iter().enumerate() {
        cols[i] = table.column(header)?;
    }

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let number = |i: usize| number_value(cell(row, cols[i]), RECORDS_SHEET, CostedRecord::COLUMNS[i]);
        let id = |i: usize| id_value(cell(row, cols[i]), RECORDS_SHEET, CostedRecord::COLUMNS[i]);

        records.push(CostedRecord {
            date: date_value(cell(row, cols[0]), RECORDS_SHEET)?,
            cost_center_id: id(1)?,
            activity_id: id(2)?,
            activity_name: text_value(cell(row, cols[3])),
            reference_code: text_value(cell(row, cols[4])),
            reference_name: text_value(cell(row, cols[5])),
            units: id(6)?,
            hours_per_worker: number(7)?,
            worker_count: id(8)?,
            total_hours: number(9)?,
            compressor_hours: number(10)?,
            user: text_value(cell(row, cols[11])),
            notes: text_value(cell(row, cols[12])),
            worker_cost: number(13)?,
            compressor_cost: number(14)?,
            total_cost: number(15)?,
            unit_cost: number(16)?,
            adjusted_units: id(17)?,
        });
    }
    Ok(records)
}
