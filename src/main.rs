// ==========================================
// IGM Loader - Binary entry
// ==========================================
// One run: every configured (table, worksheet) pair, in order.
// No CLI flags; configuration comes from IGM_LOADER_CONFIG,
// ./igm_loader.json or built-in defaults.
// ==========================================

use anyhow::Context;
use igm_loader::{logging, ConfigLoader, SyncOrchestrator};

/// Environment variable selecting the log output format
const LOG_FORMAT_ENV: &str = "IGM_LOADER_LOG_FORMAT";

fn main() -> anyhow::Result<()> {
    match std::env::var(LOG_FORMAT_ENV).as_deref() {
        Ok("json") => logging::init_json(),
        _ => logging::init(),
    }

    tracing::info!("==================================================");
    tracing::info!("{} {}", igm_loader::APP_NAME, igm_loader::VERSION);
    tracing::info!("==================================================");

    let config = ConfigLoader::load().context("loading job configuration")?;

    match &config.credentials_path {
        Some(path) => tracing::info!(credentials = %path.display(), "using service credentials"),
        None => tracing::info!("no service credentials configured"),
    }
    tracing::info!(warehouse_dir = %config.warehouse_dir.display(), "warehouse location");

    let orchestrator =
        SyncOrchestrator::from_config(config).context("initialising warehouse")?;
    let outcomes = orchestrator.run().context("sync run failed")?;

    for outcome in &outcomes {
        tracing::info!(
            table_id = %outcome.table_id,
            worksheet = %outcome.worksheet,
            job_id = %outcome.job_id,
            input = outcome.report.input_rows,
            duplicates = outcome.report.duplicate_rows,
            rejected = outcome.report.rejected_rows,
            loaded = outcome.report.output_rows,
            "pair loaded"
        );
    }

    Ok(())
}
