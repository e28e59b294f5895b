// ==========================================
// IGM Loader - Engine layer
// ==========================================
// Responsibility: sequence source → transform → sink per pair
// ==========================================

pub mod error;
pub mod orchestrator;

pub use error::{SyncError, SyncResult};
pub use orchestrator::{reader_from_config, SyncOrchestrator};
