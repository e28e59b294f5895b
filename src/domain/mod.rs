// ==========================================
// IGM Loader - Domain layer
// ==========================================
// Schema registry, row model, reporting types.
// No I/O here.
// ==========================================

pub mod load;
pub mod row;
pub mod schema;

pub use load::{
    LoadJob, LoadJobMeta, PairOutcome, RowViolation, TransformReport, ViolationKind,
};
pub use row::{CellValue, CleanRow, RawRow, RowSet};
pub use schema::{FieldDescriptor, Schema, SemanticType, DATE_FORMAT, UNIQUENESS_KEY};
