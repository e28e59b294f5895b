// ==========================================
// IGM Loader - Sync orchestrator
// ==========================================
// For each configured (table, worksheet) pair, in order:
//   fetch → transform → full-replace load
// Sequential, no parallelism. The first unrecovered error
// stops the remaining pairs; tables already loaded stay loaded.
// ==========================================

use crate::config::{JobConfig, SpreadsheetSource, TablePair};
use crate::domain::{LoadJobMeta, PairOutcome};
use crate::engine::error::{SyncError, SyncResult};
use crate::importer::{
    CsvDirectoryReader, RowSource, RowTransform, WorkbookReader, WorksheetReader,
};
use crate::repository::{SqliteWarehouse, TableSink};
use crate::importer::ImportResult;
use tracing::{debug, error, info, info_span, warn};

pub struct SyncOrchestrator<R, S>
where
    R: WorksheetReader,
    S: TableSink,
{
    config: JobConfig,
    source: RowSource<R>,
    transform: RowTransform,
    sink: S,
}

impl<R, S> SyncOrchestrator<R, S>
where
    R: WorksheetReader,
    S: TableSink,
{
    pub fn new(config: JobConfig, reader: R, sink: S) -> Self {
        Self {
            config,
            source: RowSource::new(reader),
            transform: RowTransform::default(),
            sink,
        }
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Run one pair end to end
    pub fn run_pair(&self, pair: &TablePair) -> SyncResult<PairOutcome> {
        let span = info_span!("pair", table_id = %pair.table_id, worksheet = %pair.worksheet);
        let _guard = span.enter();

        // Step 1: fetch
        let raw_rows = self
            .source
            .fetch(&pair.worksheet)
            .map_err(|source| SyncError::Import {
                worksheet: pair.worksheet.clone(),
                source,
            })?;

        // Step 2: dedup + coerce + validate
        let (clean_rows, report) = self.transform.transform(raw_rows);

        // Step 3: truncate and load
        let meta = LoadJobMeta {
            worksheet: Some(pair.worksheet.clone()),
            report: Some(report.clone()),
        };
        let job = self
            .sink
            .replace_with_job(&pair.table_id, &clean_rows, meta)
            .map_err(|source| SyncError::Load {
                table_id: pair.table_id.clone(),
                source,
            })?;

        Ok(PairOutcome {
            table_id: pair.table_id.clone(),
            worksheet: pair.worksheet.clone(),
            job_id: job.job_id,
            report,
        })
    }

    /// Configured worksheets the spreadsheet does not contain, config order
    pub fn missing_worksheets(&self) -> ImportResult<Vec<String>> {
        let available = self.source.reader().worksheet_names()?;
        Ok(self
            .config
            .pairs
            .iter()
            .filter(|pair| !available.contains(&pair.worksheet))
            .map(|pair| pair.worksheet.clone())
            .collect())
    }

    /// Run every configured pair in order
    ///
    /// # Returns
    /// - Ok(outcomes): one per pair, config order
    /// - Err(SyncError): first failing pair; later pairs were not attempted
    pub fn run(&self) -> SyncResult<Vec<PairOutcome>> {
        info!(
            project_id = %self.config.project_id,
            dataset_id = %self.config.dataset_id,
            spreadsheet = %self.config.spreadsheet_name,
            pairs = self.config.pairs.len(),
            "sync started"
        );

        // Warning only; a missing worksheet still fails at its own pair
        match self.missing_worksheets() {
            Ok(missing) if !missing.is_empty() => warn!(
                spreadsheet = %self.config.spreadsheet_name,
                ?missing,
                "worksheets not found"
            ),
            Ok(_) => {}
            Err(e) => debug!(error = %e, "worksheet listing unavailable"),
        }

        let mut outcomes = Vec::with_capacity(self.config.pairs.len());
        for pair in &self.config.pairs {
            match self.run_pair(pair) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    error!(
                        table_id = %pair.table_id,
                        worksheet = %pair.worksheet,
                        completed = outcomes.len(),
                        error = %e,
                        "sync aborted"
                    );
                    return Err(e);
                }
            }
        }

        let loaded: usize = outcomes.iter().map(|o| o.report.output_rows).sum();
        info!(tables = outcomes.len(), rows = loaded, "sync finished");
        Ok(outcomes)
    }
}

/// Reader selected by the spreadsheet section of the config
pub fn reader_from_config(source: &SpreadsheetSource) -> Box<dyn WorksheetReader> {
    match source {
        SpreadsheetSource::Workbook { path } => Box::new(WorkbookReader::new(path)),
        SpreadsheetSource::CsvDir { path } => Box::new(CsvDirectoryReader::new(path)),
    }
}

impl SyncOrchestrator<Box<dyn WorksheetReader>, SqliteWarehouse> {
    /// Wire the production collaborators from a validated config
    pub fn from_config(config: JobConfig) -> SyncResult<Self> {
        let warehouse = SqliteWarehouse::new(&config.warehouse_dir, &config.dataset_id)
            .map_err(|source| SyncError::Load {
                table_id: config.dataset_id.clone(),
                source,
            })?;
        let reader = reader_from_config(&config.spreadsheet);

        Ok(Self::new(config, reader, warehouse))
    }
}
