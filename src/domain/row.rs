// ==========================================
// IGM Loader - Row model
// ==========================================
// RawRow:   text cells as read from the worksheet
// CleanRow: cells coerced to their declared type
// ==========================================

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::domain::schema::{DATE_FORMAT, UNIQUENESS_KEY};

/// Ordered rows sharing the registry schema
pub type RowSet<R> = Vec<R>;

// ==========================================
// RawRow
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub row_number: usize,              // worksheet row number (header = 1)
    pub cells: HashMap<String, String>, // field name -> text
}

impl RawRow {
    pub fn new(row_number: usize, cells: HashMap<String, String>) -> Self {
        Self { row_number, cells }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.cells.get(field).map(String::as_str)
    }

    /// Project the (talent, date, campaign, product) key
    ///
    /// Absent cells project as empty text, so two rows both lacking
    /// a key column still collide.
    pub fn uniqueness_key(&self) -> [String; 4] {
        UNIQUENESS_KEY.map(|name| self.get(name).unwrap_or_default().to_string())
    }
}

// ==========================================
// CellValue - typed cell
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
}

impl CellValue {
    /// Null marker or empty text
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Null => "null",
            CellValue::Text(_) => "text",
            CellValue::Integer(_) => "integer",
            CellValue::Float(_) => "float",
            CellValue::Boolean(_) => "boolean",
            CellValue::Date(_) => "date",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Float(v) => write!(f, "{}", v),
            CellValue::Boolean(v) => write!(f, "{}", v),
            CellValue::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
        }
    }
}

// ==========================================
// CleanRow
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRow {
    pub row_number: usize,
    pub values: HashMap<String, CellValue>,
}

impl CleanRow {
    pub fn new(row_number: usize, values: HashMap<String, CellValue>) -> Self {
        Self { row_number, values }
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.values.get(field)
    }
}
