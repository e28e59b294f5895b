// ==========================================
// Test helpers
// ==========================================
// Responsibility: CSV worksheet fixtures, temporary warehouses,
// job configs wired to both
// ==========================================
#![allow(dead_code)]

use igm_loader::config::{JobConfig, SpreadsheetSource, TablePair};
use igm_loader::domain::{CellValue, CleanRow, RawRow, Schema};
use igm_loader::repository::SqliteWarehouse;
use std::collections::HashMap;
use std::error::Error;
use std::path::Path;
use tempfile::TempDir;

/// Every schema column, registry order
pub fn header() -> Vec<String> {
    Schema.field_names().iter().map(|s| s.to_string()).collect()
}

/// One worksheet line; unspecified columns are blank
pub fn sheet_row(values: &[(&str, &str)]) -> Vec<String> {
    header()
        .iter()
        .map(|name| {
            values
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Write `<dir>/<worksheet>.csv` with the full header plus `rows`
pub fn write_worksheet(
    dir: &Path,
    worksheet: &str,
    rows: &[Vec<String>],
) -> Result<(), Box<dyn Error>> {
    let mut writer = csv::Writer::from_path(dir.join(format!("{}.csv", worksheet)))?;
    writer.write_record(header())?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Raw row with every schema cell present
pub fn raw_row(row_number: usize, values: &[(&str, &str)]) -> RawRow {
    let cells: HashMap<String, String> = header()
        .into_iter()
        .zip(sheet_row(values))
        .collect();
    RawRow::new(row_number, cells)
}

/// Clean row with every schema column Null except `values`
pub fn clean_row(row_number: usize, values: Vec<(&str, CellValue)>) -> CleanRow {
    let mut cells: HashMap<String, CellValue> = header()
        .into_iter()
        .map(|name| (name, CellValue::Null))
        .collect();
    for (name, value) in values {
        cells.insert(name.to_string(), value);
    }
    CleanRow::new(row_number, cells)
}

/// Warehouse for dataset `seeds` inside a fresh temp directory
///
/// # Returns
/// - TempDir: keep alive for the duration of the test
pub fn create_test_warehouse() -> Result<(TempDir, SqliteWarehouse), Box<dyn Error>> {
    let dir = TempDir::new()?;
    let warehouse = SqliteWarehouse::new(dir.path(), "seeds")?;
    Ok((dir, warehouse))
}

/// Config reading CSV worksheets from `sheet_dir`, loading into `warehouse_dir`
pub fn csv_job_config(sheet_dir: &Path, warehouse_dir: &Path, pairs: &[(&str, &str)]) -> JobConfig {
    JobConfig {
        spreadsheet: SpreadsheetSource::CsvDir {
            path: sheet_dir.to_path_buf(),
        },
        warehouse_dir: warehouse_dir.to_path_buf(),
        pairs: pairs
            .iter()
            .map(|(table_id, worksheet)| TablePair::new(table_id, worksheet))
            .collect(),
        ..JobConfig::default()
    }
}

/// Talent values of a loaded table, rowid order
pub fn talents(rows: &[CleanRow]) -> Vec<String> {
    rows.iter()
        .map(|row| match row.get("talent") {
            Some(CellValue::Text(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        })
        .collect()
}
