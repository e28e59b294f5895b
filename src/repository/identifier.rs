//! Dataset/table identifier checks and quoting.
//!
//! Identifiers cannot be bound as statement parameters, so every
//! table or dataset name is validated before it reaches SQL text.

use crate::repository::error::{LoadJobError, LoadResult};

/// Ledger table kept next to the destination tables
pub const LOAD_JOBS_TABLE: &str = "_load_jobs";

const MAX_IDENTIFIER_LENGTH: usize = 128;

/// Accept `[A-Za-z0-9_]+`, not starting with a digit, bounded length.
///
/// The ledger table name is reserved.
pub fn validate_identifier(name: &str) -> LoadResult<()> {
    if name.is_empty() {
        return Err(LoadJobError::InvalidIdentifier(
            "identifier cannot be empty".to_string(),
        ));
    }

    if name.len() > MAX_IDENTIFIER_LENGTH {
        return Err(LoadJobError::InvalidIdentifier(format!(
            "{:?} exceeds {} bytes",
            name, MAX_IDENTIFIER_LENGTH
        )));
    }

    let valid_chars = name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    let starts_with_digit = name.chars().next().map(|c| c.is_ascii_digit()).unwrap_or(false);
    if !valid_chars || starts_with_digit {
        return Err(LoadJobError::InvalidIdentifier(format!(
            "{:?} must match [A-Za-z_][A-Za-z0-9_]*",
            name
        )));
    }

    if name.eq_ignore_ascii_case(LOAD_JOBS_TABLE) {
        return Err(LoadJobError::InvalidIdentifier(format!(
            "{:?} is reserved",
            name
        )));
    }

    Ok(())
}

/// Double-quote an identifier for SQLite
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
