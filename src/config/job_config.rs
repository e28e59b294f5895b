// ==========================================
// IGM Loader - Job configuration
// ==========================================
// Immutable configuration object handed to the orchestrator.
// Defaults reproduce the production setup: project dalfilo-main,
// dataset seeds, document "Influencers", three markets.
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file
pub const CONFIG_PATH_ENV: &str = "IGM_LOADER_CONFIG";

/// Config file picked up from the working directory
pub const DEFAULT_CONFIG_FILE: &str = "igm_loader.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config read failed ({path}): {message}")]
    Read { path: String, message: String },

    #[error("Config parse failed ({path}): {message}")]
    Parse { path: String, message: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// ==========================================
// SpreadsheetSource - where worksheets come from
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpreadsheetSource {
    /// Workbook export of the whole document, one tab per market
    Workbook { path: PathBuf },
    /// Directory holding `<worksheet>.csv` exports
    CsvDir { path: PathBuf },
}

impl Default for SpreadsheetSource {
    fn default() -> Self {
        SpreadsheetSource::Workbook {
            path: PathBuf::from("Influencers.xlsx"),
        }
    }
}

// ==========================================
// TablePair - (destination, source)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePair {
    pub table_id: String,
    pub worksheet: String,
}

impl TablePair {
    pub fn new(table_id: &str, worksheet: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            worksheet: worksheet.to_string(),
        }
    }
}

fn default_pairs() -> Vec<TablePair> {
    vec![
        TablePair::new("igm_italy", "it_igm_lightdash_data"),
        TablePair::new("igm_germany", "de_igm_lightdash_data"),
        TablePair::new("igm_spain", "es_igm_lightdash_data"),
    ]
}

/// `<data dir>/igm-loader/warehouse`, `./warehouse` when no data dir exists
pub fn default_warehouse_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("igm-loader").join("warehouse"))
        .unwrap_or_else(|| PathBuf::from("./warehouse"))
}

// ==========================================
// JobConfig
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub project_id: String,
    pub dataset_id: String,
    pub spreadsheet_name: String,
    pub spreadsheet: SpreadsheetSource,
    pub warehouse_dir: PathBuf,
    pub credentials_path: Option<PathBuf>,
    pub pairs: Vec<TablePair>,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            project_id: "dalfilo-main".to_string(),
            dataset_id: "seeds".to_string(),
            spreadsheet_name: "Influencers".to_string(),
            spreadsheet: SpreadsheetSource::default(),
            warehouse_dir: default_warehouse_dir(),
            credentials_path: None,
            pairs: default_pairs(),
        }
    }
}

impl JobConfig {
    /// Parse a JSON document; absent keys take their default
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().display().to_string();
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Read {
            path: path_str.clone(),
            message: e.to_string(),
        })?;

        Self::from_json_str(&raw).map_err(|e| ConfigError::Parse {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Check the start-up invariants
    ///
    /// - at least one pair, table ids unique, no blank ids
    /// - credentials file present when configured
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.project_id.trim().is_empty() || self.dataset_id.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "project_id and dataset_id must be set".to_string(),
            ));
        }

        if self.pairs.is_empty() {
            return Err(ConfigError::Invalid("no (table, worksheet) pairs".to_string()));
        }

        let mut seen = HashSet::new();
        for pair in &self.pairs {
            if pair.table_id.trim().is_empty() || pair.worksheet.trim().is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "blank table or worksheet in pair {:?}",
                    pair
                )));
            }
            if !seen.insert(pair.table_id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "table {} is listed twice",
                    pair.table_id
                )));
            }
        }

        if let Some(credentials) = &self.credentials_path {
            if !credentials.is_file() {
                return Err(ConfigError::Invalid(format!(
                    "credentials file not found: {}",
                    credentials.display()
                )));
            }
        }

        Ok(())
    }
}

// ==========================================
// ConfigLoader
// ==========================================
// Lookup order: $IGM_LOADER_CONFIG → ./igm_loader.json → defaults
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn load() -> Result<JobConfig, ConfigError> {
        let explicit = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Self::load_from(explicit.as_deref(), Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Resolve without touching the environment
    ///
    /// An explicit path must exist; the fallback file is optional.
    pub fn load_from(explicit: Option<&Path>, fallback: &Path) -> Result<JobConfig, ConfigError> {
        let config = match explicit {
            Some(path) => JobConfig::from_file(path)?,
            None if fallback.is_file() => JobConfig::from_file(fallback)?,
            None => JobConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_have_three_markets() {
        let config = JobConfig::default();
        assert_eq!(config.pairs.len(), 3);
        assert_eq!(config.pairs[0], TablePair::new("igm_italy", "it_igm_lightdash_data"));
        assert_eq!(config.pairs[1], TablePair::new("igm_germany", "de_igm_lightdash_data"));
        assert_eq!(config.pairs[2], TablePair::new("igm_spain", "es_igm_lightdash_data"));
        assert_eq!(config.dataset_id, "seeds");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = JobConfig::from_json_str(
            r#"{ "dataset_id": "staging", "spreadsheet": { "kind": "csv_dir", "path": "exports" } }"#,
        )
        .unwrap();

        assert_eq!(config.dataset_id, "staging");
        assert_eq!(config.project_id, "dalfilo-main");
        assert_eq!(
            config.spreadsheet,
            SpreadsheetSource::CsvDir {
                path: PathBuf::from("exports")
            }
        );
        assert_eq!(config.pairs.len(), 3);
    }

    #[test]
    fn test_duplicate_table_rejected() {
        let config = JobConfig {
            pairs: vec![
                TablePair::new("igm_italy", "a"),
                TablePair::new("igm_italy", "b"),
            ],
            ..JobConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_empty_pairs_rejected() {
        let config = JobConfig {
            pairs: Vec::new(),
            ..JobConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_credentials_rejected() {
        let config = JobConfig {
            credentials_path: Some(PathBuf::from("/nonexistent/hex_admin.json")),
            ..JobConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "project_id": "other-project" }}"#).unwrap();

        let config =
            ConfigLoader::load_from(Some(file.path()), Path::new("/nonexistent.json")).unwrap();
        assert_eq!(config.project_id, "other-project");
    }

    #[test]
    fn test_load_from_missing_explicit_file() {
        let result = ConfigLoader::load_from(
            Some(Path::new("/nonexistent/igm.json")),
            Path::new("/nonexistent.json"),
        );
        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn test_load_from_falls_back_to_defaults() {
        let config = ConfigLoader::load_from(None, Path::new("/nonexistent.json")).unwrap();
        assert_eq!(config, JobConfig::default());
    }

    #[test]
    fn test_malformed_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = ConfigLoader::load_from(Some(file.path()), Path::new("/nonexistent.json"));
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
