// ==========================================
// IGM Loader - Warehouse layer
// ==========================================
// Responsibility: full-replace loads + load job ledger
// Storage: SQLite, one database per dataset
// No row validation here; rows arrive already clean.
// ==========================================

pub mod error;
pub mod identifier;
pub mod sqlite_warehouse;
pub mod table_sink;

pub use error::{LoadJobError, LoadResult};
pub use sqlite_warehouse::SqliteWarehouse;
pub use table_sink::TableSink;
