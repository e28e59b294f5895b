// ==========================================
// IGM Loader - Importer error types
// ==========================================
// Tool: thiserror derive
// ImportError: worksheet access, propagated to the driver
// CellError:   per-cell validation, absorbed by the transform
// ==========================================

use thiserror::Error;

/// Importer error type
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Document / worksheet =====
    #[error("Spreadsheet not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported spreadsheet format: {0} (expected .xlsx/.xlsm/.xls/.ods or a CSV directory)")]
    UnsupportedFormat(String),

    #[error("Spreadsheet read failed: {0}")]
    FileReadError(String),

    #[error("Workbook parse failed: {0}")]
    ExcelParseError(String),

    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("Worksheet not found: {0}")]
    WorksheetNotFound(String),

    #[error("Worksheet {0} has no header row")]
    EmptyWorksheet(String),

    // ===== Projection =====
    #[error("Worksheet {worksheet} is missing column {column}")]
    MissingColumn { worksheet: String, column: String },
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result alias
pub type ImportResult<T> = Result<T, ImportError>;

/// Cell-level validation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CellError {
    #[error("cannot convert {value:?} to {expected}")]
    ValueConversion { value: String, expected: String },

    #[error("expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("field {0} is not present in the row")]
    SchemaInvalidData(String),
}
