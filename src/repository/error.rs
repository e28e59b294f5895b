// ==========================================
// IGM Loader - Warehouse error types
// ==========================================
// Tool: thiserror derive
// Every warehouse rejection surfaces as LoadJobError and is
// returned to the caller; nothing here is retried.
// ==========================================

use thiserror::Error;

/// Load job failure
#[derive(Error, Debug)]
pub enum LoadJobError {
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Schema mismatch for table {table}: {message}")]
    SchemaMismatch { table: String, message: String },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Warehouse query failed: {0}")]
    Database(String),

    #[error("Warehouse storage unavailable: {0}")]
    Io(String),

    #[error("Load report serialization failed: {0}")]
    Serialization(String),
}

impl From<rusqlite::Error> for LoadJobError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(ref msg)) if msg.contains("constraint") => {
                LoadJobError::ConstraintViolation(msg.clone())
            }
            _ => LoadJobError::Database(err.to_string()),
        }
    }
}

impl From<std::io::Error> for LoadJobError {
    fn from(err: std::io::Error) -> Self {
        LoadJobError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LoadJobError {
    fn from(err: serde_json::Error) -> Self {
        LoadJobError::Serialization(err.to_string())
    }
}

/// Result alias
pub type LoadResult<T> = Result<T, LoadJobError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_failure_mapping() {
        let err = rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(19),
            Some("NOT NULL constraint failed: igm_italy.talent".to_string()),
        );
        assert!(matches!(
            LoadJobError::from(err),
            LoadJobError::ConstraintViolation(_)
        ));
    }

    #[test]
    fn test_other_failure_mapping() {
        let err = rusqlite::Error::QueryReturnedNoRows;
        assert!(matches!(LoadJobError::from(err), LoadJobError::Database(_)));
    }
}
