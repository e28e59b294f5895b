// ==========================================
// IGM Loader - Table sink trait
// ==========================================
// Warehouse collaborator, write side.
// Contract: full replace. Prior contents are discarded,
// never merged or appended.
// ==========================================

use crate::domain::{CleanRow, LoadJob, LoadJobMeta};
use crate::repository::error::LoadResult;

// ==========================================
// TableSink Trait
// ==========================================
// Implementor: SqliteWarehouse
pub trait TableSink: Send + Sync {
    /// Replace a table's full contents, recording a load job
    ///
    /// # Arguments
    /// - table_id: destination table inside the configured dataset
    /// - rows: clean rows conforming to the registry schema
    /// - meta: source worksheet and transform report for the ledger
    ///
    /// # Returns
    /// - Ok(LoadJob): the table now holds exactly `rows`
    /// - Err(LoadJobError): nothing changed
    fn replace_with_job(
        &self,
        table_id: &str,
        rows: &[CleanRow],
        meta: LoadJobMeta,
    ) -> LoadResult<LoadJob>;

    /// Replace a table's full contents
    fn replace(&self, table_id: &str, rows: &[CleanRow]) -> LoadResult<LoadJob> {
        self.replace_with_job(table_id, rows, LoadJobMeta::default())
    }
}
