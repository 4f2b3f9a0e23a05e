//! Create and read operations over a [`PasteStore`].
//!
//! Both HTTP read routes go through [`read_paste`], so view accounting is the
//! same whether the caller asked for JSON or a rendered page.

use crate::constants::MAX_ID_ATTEMPTS;
use crate::db::PasteStore;
use crate::error::AppError;
use crate::lifecycle;
use crate::models::paste::{CreatePasteRequest, Paste, PasteView};

/// Validate `req` and persist a new paste created at `now`.
///
/// # Returns
/// The stored [`Paste`], including its generated id.
///
/// # Errors
/// - [`AppError::Validation`] for bad input (storage is not touched).
/// - [`AppError::DuplicateId`] if every generated id collided.
/// - Storage errors from the first failing insert.
pub fn create_paste(
    store: &dyn PasteStore,
    req: CreatePasteRequest,
    max_paste_size: usize,
    now: i64,
) -> Result<Paste, AppError> {
    let new = lifecycle::validate_create(req, max_paste_size, now)?;

    let mut last_collision = String::new();
    for _ in 0..MAX_ID_ATTEMPTS {
        let paste = Paste::new(new.clone(), now);
        match store.insert(&paste) {
            Ok(()) => {
                tracing::debug!(id = %paste.id, "created paste");
                return Ok(paste);
            }
            Err(AppError::DuplicateId(id)) => {
                tracing::warn!("Generated paste id {} already exists; retrying", id);
                last_collision = id;
            }
            Err(err) => return Err(err),
        }
    }
    Err(AppError::DuplicateId(last_collision))
}

/// Serve one read of paste `id` at `now`, counting it as a view.
///
/// Missing, expired and exhausted pastes all yield [`AppError::NotFound`].
/// A failed view increment is logged and the read still succeeds; the
/// response then assumes this read was the only one in flight.
///
/// # Errors
/// [`AppError::NotFound`] or a storage error from the lookup.
pub fn read_paste(store: &dyn PasteStore, id: &str, now: i64) -> Result<PasteView, AppError> {
    let mut paste = store.get(id)?.ok_or(AppError::NotFound)?;
    if !lifecycle::is_visible(&paste, now) {
        return Err(AppError::NotFound);
    }

    paste.views = match store.increment_view(id) {
        Ok(Some(views)) => views,
        Ok(None) => return Err(AppError::NotFound),
        Err(err) => {
            tracing::warn!("Failed to record view for paste {}: {}", id, err);
            paste.views.saturating_add(1)
        }
    };

    Ok(lifecycle::compute_response(&paste))
}
