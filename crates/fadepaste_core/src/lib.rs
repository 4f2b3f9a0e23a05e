//! Core domain library for fadepaste (config, storage, lifecycle rules).

/// Time sources used by the lifecycle evaluator.
pub mod clock;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Storage trait and adapters.
pub mod db;
/// Application error types (storage/domain).
pub mod error;
/// Visibility, expiry and validation rules.
pub mod lifecycle;
/// Data models for API requests and persistence.
pub mod models;
/// Create and read operations composed from the store and evaluator.
pub mod paste_ops;

#[cfg(test)]
pub(crate) mod test_support;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, StorageKind};
pub use constants::{DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT, TEST_NOW_HEADER};
pub use db::{memory::MemoryStore, open_store, paste::PasteDb, PasteStore};
pub use error::AppError;
