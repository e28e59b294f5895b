// ==========================================
// IGM Loader - Row source
// ==========================================
// Reads one worksheet and projects it onto the registry schema:
// header row → column names, extra columns dropped,
// missing schema column → MissingColumn.
// ==========================================

use crate::domain::{RawRow, RowSet, Schema};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::WorksheetReader;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

pub struct RowSource<R: WorksheetReader> {
    reader: R,
    schema: Schema,
}

impl<R: WorksheetReader> RowSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            schema: Schema,
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Fetch one worksheet as a raw row set
    ///
    /// # Arguments
    /// - worksheet_name: tab title, e.g. `it_igm_lightdash_data`
    ///
    /// # Returns
    /// - Ok(rows): one RawRow per data row up to the last non-blank one,
    ///   schema fields only
    /// - Err(MissingColumn): a schema field is absent from the header
    /// - Err(WorksheetNotFound / EmptyWorksheet / read errors)
    #[instrument(skip(self))]
    pub fn fetch(&self, worksheet_name: &str) -> ImportResult<RowSet<RawRow>> {
        let grid = self.reader.read_worksheet(worksheet_name)?;
        let rows = self.project(worksheet_name, grid)?;

        info!(worksheet = worksheet_name, rows = rows.len(), "worksheet fetched");
        Ok(rows)
    }

    /// Header lookup + projection onto schema field order
    fn project(
        &self,
        worksheet_name: &str,
        grid: Vec<Vec<String>>,
    ) -> ImportResult<RowSet<RawRow>> {
        let mut grid_rows = grid.into_iter();
        let header = grid_rows
            .next()
            .ok_or_else(|| ImportError::EmptyWorksheet(worksheet_name.to_string()))?;

        // First occurrence wins for repeated header names
        let mut column_index: HashMap<&str, usize> = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            column_index.entry(name.trim()).or_insert(idx);
        }

        let mut projection = Vec::with_capacity(self.schema.len());
        for field in self.schema.fields() {
            match column_index.get(field.name) {
                Some(&idx) => projection.push((field.name, idx)),
                None => {
                    return Err(ImportError::MissingColumn {
                        worksheet: worksheet_name.to_string(),
                        column: field.name.to_string(),
                    })
                }
            }
        }

        // Trailing blank rows are spreadsheet padding; blank rows in
        // between are records and go through dedup like any other
        let mut data: Vec<Vec<String>> = grid_rows.collect();
        let last_filled = data
            .iter()
            .rposition(|cells| cells.iter().any(|c| !c.is_empty()))
            .map_or(0, |pos| pos + 1);
        let trailing_blank = data.len() - last_filled;
        data.truncate(last_filled);

        let mut rows = Vec::with_capacity(data.len());
        for (offset, cells) in data.into_iter().enumerate() {
            let projected: HashMap<String, String> = projection
                .iter()
                .map(|(name, idx)| {
                    let value = cells.get(*idx).cloned().unwrap_or_default();
                    (name.to_string(), value)
                })
                .collect();

            // header is worksheet row 1
            rows.push(RawRow::new(offset + 2, projected));
        }

        if trailing_blank > 0 {
            debug!(worksheet = worksheet_name, trailing_blank, "trailing blank rows dropped");
        }

        Ok(rows)
    }
}
