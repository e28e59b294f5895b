// ==========================================
// IGM Loader - Importer layer
// ==========================================
// Responsibility: worksheet → clean row set
// Sources: workbook export, CSV directory
// ==========================================

pub mod conflict_handler;
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod importer_trait;
pub mod row_source;
pub mod row_transform;
pub mod sheet_reader;

// Implementations
pub use conflict_handler::ConflictHandler as ConflictHandlerImpl;
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{CellError, ImportError, ImportResult};
pub use row_source::RowSource;
pub use row_transform::RowTransform;
pub use sheet_reader::{CsvDirectoryReader, WorkbookReader};

// Traits
pub use importer_trait::{ConflictHandler, DataCleaner, DqValidator, WorksheetReader};
