// ==========================================
// IGM Loader - Core library
// ==========================================
// Influencer-marketing worksheets → dedup/validate → warehouse tables
// Runtime: synchronous, one pass per configured market
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - schema and row model
pub mod domain;

// Warehouse layer - full-replace sink
pub mod repository;

// Engine layer - job driver
pub mod engine;

// Importer layer - worksheet source and transform
pub mod importer;

// Configuration layer
pub mod config;

// Database infrastructure (connection setup / PRAGMA)
pub mod db;

// Logging
pub mod logging;

// ==========================================
// Re-exports
// ==========================================

pub use config::{ConfigLoader, JobConfig, SpreadsheetSource, TablePair};
pub use domain::{
    CellValue, CleanRow, LoadJob, PairOutcome, RawRow, RowViolation, Schema, SemanticType,
    TransformReport, ViolationKind,
};
pub use engine::{SyncError, SyncOrchestrator};
pub use importer::{ImportError, RowSource, RowTransform};
pub use repository::{LoadJobError, SqliteWarehouse, TableSink};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "IGM Loader";
