// ==========================================
// IGM Loader - Importer traits
// ==========================================
// One trait per pipeline stage (no implementations here):
// read → dedup → coerce → validate
// ==========================================

use crate::domain::{CellValue, CleanRow, FieldDescriptor, RawRow, RowViolation, SemanticType};
use crate::importer::error::{CellError, ImportResult};

// ==========================================
// WorksheetReader Trait
// ==========================================
// Purpose: spreadsheet collaborator, read-only
// Implementors: WorkbookReader, CsvDirectoryReader
pub trait WorksheetReader: Send + Sync {
    /// Read every row of a worksheet, header row first
    ///
    /// # Arguments
    /// - worksheet_name: tab title inside the configured document
    ///
    /// # Returns
    /// - Ok(grid): rows of text cells, header included
    /// - Err(WorksheetNotFound): no such tab
    fn read_worksheet(&self, worksheet_name: &str) -> ImportResult<Vec<Vec<String>>>;

    /// Worksheet titles available in the document
    fn worksheet_names(&self) -> ImportResult<Vec<String>>;
}

// ==========================================
// ConflictHandler Trait
// ==========================================
// Purpose: uniqueness-key collision detection
// Implementor: ConflictHandlerImpl
pub trait ConflictHandler: Send + Sync {
    /// Detect every row whose uniqueness key is shared within the batch
    ///
    /// # Returns
    /// - Vec<(position, key)>: all members of colliding groups,
    ///   first occurrence included, in input order
    fn detect_duplicates(&self, rows: &[RawRow]) -> Vec<(usize, String)>;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// Purpose: best-effort coercion of text cells
// Implementor: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// Coerce one text cell to its declared type
    ///
    /// Never fails: a value that cannot be coerced comes back as `CellValue::Text`.
    fn coerce_cell(&self, semantic_type: SemanticType, value: &str) -> CellValue;

    /// Coerce a whole raw row into a clean row
    fn clean_row(&self, row: &RawRow, fields: &[FieldDescriptor]) -> CleanRow;
}

// ==========================================
// DqValidator Trait
// ==========================================
// Purpose: strict per-cell type check, authoritative for row acceptance
// Implementor: DqValidatorImpl
pub trait DqValidator: Send + Sync {
    /// Check one cell against its field descriptor
    ///
    /// # Returns
    /// - Ok(()): empty/null, or interpretable as the declared type
    /// - Err(CellError): interpretation failed
    fn validate_cell(&self, field: &FieldDescriptor, value: Option<&CellValue>)
        -> Result<(), CellError>;

    /// Check every schema field of a row
    ///
    /// # Returns
    /// - Vec<RowViolation>: empty when the row is accepted
    fn validate_row(&self, row: &CleanRow, fields: &[FieldDescriptor]) -> Vec<RowViolation>;
}

impl<T: WorksheetReader + ?Sized> WorksheetReader for Box<T> {
    fn read_worksheet(&self, worksheet_name: &str) -> ImportResult<Vec<Vec<String>>> {
        (**self).read_worksheet(worksheet_name)
    }

    fn worksheet_names(&self) -> ImportResult<Vec<String>> {
        (**self).worksheet_names()
    }
}
