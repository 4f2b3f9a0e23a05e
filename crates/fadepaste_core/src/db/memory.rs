//! Process-local paste store.

use crate::{db::PasteStore, error::AppError, models::paste::Paste};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// Paste store kept in a mutex-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pastes: Mutex<HashMap<String, Paste>>,
}

impl MemoryStore {
    fn rows(&self) -> Result<MutexGuard<'_, HashMap<String, Paste>>, AppError> {
        self.pastes
            .lock()
            .map_err(|_| AppError::StorageMessage("Memory store lock poisoned".to_string()))
    }
}

impl PasteStore for MemoryStore {
    fn insert(&self, paste: &Paste) -> Result<(), AppError> {
        let mut rows = self.rows()?;
        if rows.contains_key(&paste.id) {
            return Err(AppError::DuplicateId(paste.id.clone()));
        }
        rows.insert(paste.id.clone(), paste.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Option<Paste>, AppError> {
        Ok(self.rows()?.get(id).cloned())
    }

    fn increment_view(&self, id: &str) -> Result<Option<u64>, AppError> {
        let mut rows = self.rows()?;
        Ok(rows.get_mut(id).map(|paste| {
            paste.views = paste.views.saturating_add(1);
            paste.views
        }))
    }

    fn ping(&self) -> Result<(), AppError> {
        self.rows().map(|_| ())
    }
}
