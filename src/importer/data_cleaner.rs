// ==========================================
// IGM Loader - Data cleaner
// ==========================================
// Best-effort coercion pass:
// INTEGER/FLOAT → number, BOOLEAN → literal set, DATE → %Y-%m-%d.
// A value that does not coerce is kept as text; rejecting it is
// the validator's job.
// ==========================================

use crate::domain::{CellValue, CleanRow, FieldDescriptor, RawRow, SemanticType, DATE_FORMAT};
use crate::importer::importer_trait::DataCleaner as DataCleanerTrait;
use chrono::NaiveDate;
use std::collections::HashMap;

pub const TRUE_LITERALS: [&str; 3] = ["true", "1", "yes"];
pub const FALSE_LITERALS: [&str; 4] = ["false", "0", "no", ""];

pub struct DataCleaner;

impl DataCleaner {
    /// Integer reading shared with the validator.
    ///
    /// Integral float text (`"3.0"`, `"1e3"`) counts as an integer,
    /// spreadsheet exports render whole numbers that way.
    pub fn parse_integer(value: &str) -> Option<i64> {
        let trimmed = value.trim();
        if let Ok(v) = trimmed.parse::<i64>() {
            return Some(v);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some(f as i64)
            }
            _ => None,
        }
    }

    pub fn parse_float(value: &str) -> Option<f64> {
        value.trim().parse::<f64>().ok()
    }

    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
    }

    /// Case-insensitive boolean literal lookup
    ///
    /// # Returns
    /// - Some(true):  "true" / "1" / "yes"
    /// - Some(false): "false" / "0" / "no" / ""
    /// - None:        anything else
    pub fn parse_bool(value: &str) -> Option<bool> {
        let lower = value.to_lowercase();
        if TRUE_LITERALS.contains(&lower.as_str()) {
            Some(true)
        } else if FALSE_LITERALS.contains(&lower.as_str()) {
            Some(false)
        } else {
            None
        }
    }
}

impl DataCleanerTrait for DataCleaner {
    fn coerce_cell(&self, semantic_type: SemanticType, value: &str) -> CellValue {
        let fallback = || CellValue::Text(value.to_string());
        match semantic_type {
            SemanticType::String => fallback(),
            SemanticType::Integer => Self::parse_integer(value)
                .map(CellValue::Integer)
                .unwrap_or_else(fallback),
            SemanticType::Float => Self::parse_float(value)
                .map(CellValue::Float)
                .unwrap_or_else(fallback),
            SemanticType::Boolean => Self::parse_bool(value)
                .map(CellValue::Boolean)
                .unwrap_or_else(fallback),
            SemanticType::Date => Self::parse_date(value)
                .map(CellValue::Date)
                .unwrap_or_else(fallback),
        }
    }

    fn clean_row(&self, row: &RawRow, fields: &[FieldDescriptor]) -> CleanRow {
        // Absent cells stay absent so the validator can flag them
        let values: HashMap<String, CellValue> = fields
            .iter()
            .filter_map(|field| {
                row.get(field.name).map(|text| {
                    (
                        field.name.to_string(),
                        self.coerce_cell(field.semantic_type, text),
                    )
                })
            })
            .collect();

        CleanRow::new(row.row_number, values)
    }
}
