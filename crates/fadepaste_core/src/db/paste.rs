//! Paste storage operations backed by redb.

use crate::{constants::REDB_FILE_NAME, db::tables::PASTES, db::PasteStore, error::AppError};
use crate::models::paste::Paste;
use redb::{ReadableDatabase, ReadableTable};
use std::path::Path;
use std::sync::Arc;

fn deserialize_paste(bytes: &[u8]) -> Result<Paste, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

/// Accessor for the redb `pastes` table.
pub struct PasteDb {
    db: Arc<redb::Database>,
}

impl PasteDb {
    /// Open (or create) `<dir>/data.redb` and initialize tables.
    ///
    /// # Errors
    /// Returns an error when the directory or database file cannot be created.
    pub fn open(dir: &str) -> Result<Self, AppError> {
        std::fs::create_dir_all(dir).map_err(|err| {
            AppError::StorageMessage(format!("Failed to create DB directory '{}': {}", dir, err))
        })?;
        let db = redb::Database::create(Path::new(dir).join(REDB_FILE_NAME))?;
        Self::new(Arc::new(db))
    }

    /// Initialize paste tables if they do not exist yet.
    ///
    /// # Returns
    /// A new [`PasteDb`] accessor bound to `db`.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }
}

impl PasteStore for PasteDb {
    fn insert(&self, paste: &Paste) -> Result<(), AppError> {
        let encoded = bincode::serialize(paste)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut pastes = write_txn.open_table(PASTES)?;
            if pastes.get(paste.id.as_str())?.is_some() {
                return Err(AppError::DuplicateId(paste.id.clone()));
            }
            pastes.insert(paste.id.as_str(), encoded.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    fn increment_view(&self, id: &str) -> Result<Option<u64>, AppError> {
        // redb admits one write transaction at a time, so the read and the
        // write below cannot interleave with another increment.
        let write_txn = self.db.begin_write()?;
        let views = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let Some(guard) = pastes.get(id)? else {
                return Ok(None);
            };
            let mut paste = deserialize_paste(guard.value())?;
            drop(guard);

            paste.views = paste.views.saturating_add(1);
            let encoded = bincode::serialize(&paste)?;
            pastes.insert(id, encoded.as_slice())?;
            paste.views
        };
        write_txn.commit()?;
        Ok(Some(views))
    }

    fn ping(&self) -> Result<(), AppError> {
        let read_txn = self.db.begin_read()?;
        read_txn.open_table(PASTES)?;
        Ok(())
    }
}
