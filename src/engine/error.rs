// ==========================================
// IGM Loader - Sync error
// ==========================================
// Unrecovered per-pair failures. The first one aborts the run.
// ==========================================

use crate::importer::ImportError;
use crate::repository::LoadJobError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to read worksheet {worksheet}")]
    Import {
        worksheet: String,
        #[source]
        source: ImportError,
    },

    #[error("Failed to load table {table_id}")]
    Load {
        table_id: String,
        #[source]
        source: LoadJobError,
    },
}

pub type SyncResult<T> = Result<T, SyncError>;
