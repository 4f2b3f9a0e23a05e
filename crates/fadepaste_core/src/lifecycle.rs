//! Paste lifecycle rules: visibility, derived response fields and input validation.
//!
//! Everything here is pure. `now` is always passed in as epoch milliseconds so
//! callers decide where time comes from.

use crate::error::AppError;
use crate::models::paste::{CreatePasteRequest, NewPaste, Paste, PasteView};
use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

/// Largest integer a JSON double represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Expiry instant in epoch milliseconds, or `None` when the paste has no TTL.
pub fn expires_at_millis(paste: &Paste) -> Option<i64> {
    paste.ttl_seconds.map(|ttl| {
        let ttl_millis = i64::try_from(ttl).unwrap_or(i64::MAX).saturating_mul(1000);
        paste.created_at.saturating_add(ttl_millis)
    })
}

/// Whether a stored paste may still be served at `now`.
///
/// The TTL boundary is inclusive: at exactly `created_at + ttl_seconds * 1000`
/// the paste is already expired. The view cap is checked against the stored
/// count before the current read increments it, so `max_views = 1` allows
/// exactly one read.
pub fn is_visible(paste: &Paste, now: i64) -> bool {
    if let Some(expires_at) = expires_at_millis(paste) {
        if now >= expires_at {
            return false;
        }
    }
    if let Some(max_views) = paste.max_views {
        if paste.views >= max_views {
            return false;
        }
    }
    true
}

/// Build the read response from a paste whose `views` already includes the
/// current read.
pub fn compute_response(paste: &Paste) -> PasteView {
    PasteView {
        content: paste.content.clone(),
        remaining_views: paste
            .max_views
            .map(|max_views| max_views.saturating_sub(paste.views)),
        expires_at: expires_at_millis(paste).and_then(format_timestamp_millis),
    }
}

/// Format epoch milliseconds as ISO-8601 UTC, e.g. `2024-01-01T00:00:00.000Z`.
pub fn format_timestamp_millis(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Validate a raw create payload for a paste created at `now`.
///
/// # Arguments
/// - `req`: Untyped request fields.
/// - `max_paste_size`: Content size limit in bytes.
/// - `now`: Creation time in epoch milliseconds, used to bound the TTL.
///
/// # Returns
/// The validated [`NewPaste`]. Content is kept as submitted (not trimmed).
///
/// # Errors
/// Returns [`AppError::Validation`] naming the first offending field.
pub fn validate_create(
    req: CreatePasteRequest,
    max_paste_size: usize,
    now: i64,
) -> Result<NewPaste, AppError> {
    let content = match req.content {
        Some(Value::String(content)) if !content.trim().is_empty() => content,
        _ => return Err(AppError::Validation("content is required".to_string())),
    };

    if content.len() > max_paste_size {
        return Err(AppError::Validation(format!(
            "Paste size exceeds maximum of {} bytes",
            max_paste_size
        )));
    }

    let ttl_seconds = optional_positive_integer(req.ttl_seconds.as_ref(), "ttl_seconds")?;
    let max_views = optional_positive_integer(req.max_views.as_ref(), "max_views")?;

    if let Some(ttl) = ttl_seconds {
        if expiry_timestamp(now, ttl).is_none() {
            return Err(AppError::Validation("ttl_seconds is too large".to_string()));
        }
    }

    Ok(NewPaste {
        content,
        ttl_seconds,
        max_views,
    })
}

/// Expiry as a formattable instant, or `None` past chrono's range.
fn expiry_timestamp(created_at: i64, ttl_seconds: u64) -> Option<String> {
    let ttl_millis = i64::try_from(ttl_seconds).ok()?.checked_mul(1000)?;
    format_timestamp_millis(created_at.checked_add(ttl_millis)?)
}

/// Absent means no limit. Anything present, `null` included, must be a
/// positive integer.
fn optional_positive_integer(value: Option<&Value>, field: &str) -> Result<Option<u64>, AppError> {
    match value {
        None => Ok(None),
        Some(value) => positive_integer(value)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{} must be >= 1", field))),
    }
}

fn positive_integer(value: &Value) -> Option<u64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(int) = number.as_u64() {
        return (1..=MAX_SAFE_INTEGER as u64).contains(&int).then_some(int);
    }
    // `5.0` is an integer in JSON terms; `1.5` and negatives are not.
    let float = number.as_f64()?;
    if float.fract() == 0.0 && (1.0..=MAX_SAFE_INTEGER).contains(&float) {
        Some(float as u64)
    } else {
        None
    }
}
