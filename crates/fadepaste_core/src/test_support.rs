//! Shared test-only helpers for fadepaste_core.

use crate::db::paste::PasteDb;
use crate::models::paste::{NewPaste, Paste};
use tempfile::TempDir;

/// Creates an isolated temporary redb store and returns it with the temp dir.
///
/// Keep the [`TempDir`] alive for the full test to preserve the backing files.
pub(crate) fn setup_temp_db() -> (PasteDb, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db = PasteDb::open(db_path.to_str().expect("db path")).expect("db");
    (db, temp_dir)
}

/// Build an unviewed paste with the given limits.
pub(crate) fn sample_paste(ttl_seconds: Option<u64>, max_views: Option<u64>) -> Paste {
    Paste::new(
        NewPaste {
            content: "sample content".to_string(),
            ttl_seconds,
            max_views,
        },
        1_700_000_000_000,
    )
}
