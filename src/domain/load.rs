// ==========================================
// IGM Loader - Transform and load reporting
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ViolationKind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    DuplicateKey,       // uniqueness key shared with another row
    ValueConversion,    // text could not be read as the declared type
    TypeMismatch,       // typed value of the wrong kind
    SchemaInvalidData,  // schema field absent from the row
}

// ==========================================
// RowViolation - why a row left the batch
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowViolation {
    pub row_number: usize,
    pub field: String,
    pub value: String,
    pub kind: ViolationKind,
    pub message: String,
}

// ==========================================
// TransformReport
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransformReport {
    pub input_rows: usize,
    pub duplicate_rows: usize,  // dropped by the dedup pass
    pub rejected_rows: usize,   // dropped by validation
    pub output_rows: usize,
    pub violations: Vec<RowViolation>,
}

// ==========================================
// LoadJob - one full-replace of one table
// ==========================================
// Mirrors a row of the `_load_jobs` ledger table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadJob {
    pub job_id: String,                 // UUID v4
    pub dataset: String,
    pub table_id: String,
    pub worksheet: Option<String>,      // source worksheet, if known
    pub total_rows: usize,
    pub duplicate_rows: usize,
    pub rejected_rows: usize,
    pub loaded_rows: usize,
    pub loaded_at: DateTime<Utc>,
    pub elapsed_ms: i64,
    pub report_json: Option<String>,
}

/// Caller-supplied part of a load job; the sink fills in the rest
#[derive(Debug, Clone, Default)]
pub struct LoadJobMeta {
    pub worksheet: Option<String>,
    pub report: Option<TransformReport>,
}

// ==========================================
// PairOutcome - driver result per pair
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairOutcome {
    pub table_id: String,
    pub worksheet: String,
    pub job_id: String,
    pub report: TransformReport,
}
