// ==========================================
// IGM Loader - Configuration layer
// ==========================================
// Responsibility: load and validate the immutable job config
// Source: JSON file (optional), otherwise built-in defaults
// ==========================================

pub mod job_config;

pub use job_config::{
    default_warehouse_dir, ConfigError, ConfigLoader, JobConfig, SpreadsheetSource, TablePair,
    CONFIG_PATH_ENV, DEFAULT_CONFIG_FILE,
};
