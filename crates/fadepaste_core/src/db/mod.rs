//! Persistence boundary for pastes.
//!
//! [`PasteStore`] is the only interface the lifecycle operations use. Each
//! storage technology gets one adapter: [`paste::PasteDb`] (redb, durable) and
//! [`memory::MemoryStore`] (process-local).

/// In-memory store adapter.
pub mod memory;
/// redb-backed store adapter.
pub mod paste;
/// redb table definitions.
pub mod tables;


use crate::config::{Config, StorageKind};
use crate::error::AppError;
use crate::models::paste::Paste;
use std::sync::Arc;

/// Keyed storage for paste rows.
///
/// Implementations must make [`PasteStore::increment_view`] atomic: concurrent
/// calls on the same id each add exactly one to the stored counter.
pub trait PasteStore: Send + Sync {
    /// Insert a new row.
    ///
    /// # Errors
    /// [`AppError::DuplicateId`] when the id is taken, otherwise a storage error.
    fn insert(&self, paste: &Paste) -> Result<(), AppError>;

    /// Point lookup. `Ok(None)` when the id was never stored.
    fn get(&self, id: &str) -> Result<Option<Paste>, AppError>;

    /// Add one to the stored view counter.
    ///
    /// # Returns
    /// The counter after the increment, or `None` when the id is missing.
    fn increment_view(&self, id: &str) -> Result<Option<u64>, AppError>;

    /// Check that the backing storage is reachable.
    fn ping(&self) -> Result<(), AppError>;
}

/// Open the store selected by `config.storage`.
///
/// # Errors
/// Returns an error when the redb file cannot be created or initialized.
pub fn open_store(config: &Config) -> Result<Arc<dyn PasteStore>, AppError> {
    match config.storage {
        StorageKind::Redb => {
            let db = paste::PasteDb::open(&config.db_path)?;
            tracing::info!("Opened redb paste store at {}", config.db_path);
            Ok(Arc::new(db))
        }
        StorageKind::Memory => {
            tracing::warn!("Using in-memory paste store; pastes are lost on restart");
            Ok(Arc::new(memory::MemoryStore::default()))
        }
    }
}
