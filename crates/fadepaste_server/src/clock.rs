//! Per-request current time.
//!
//! Handlers take [`RequestNow`] instead of reading the clock. In test mode a
//! request may pin the time with the `x-test-now-ms` header.

use crate::AppState;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts, http::HeaderMap};
use fadepaste_core::{Clock, TEST_NOW_HEADER};
use std::convert::Infallible;

/// Current time for this request in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestNow(pub i64);

/// Resolve the time a request should be evaluated at.
///
/// The header is ignored unless `test_mode` is set. Unparseable header values
/// fall back to `clock`.
pub fn resolve_now(headers: &HeaderMap, test_mode: bool, clock: &dyn Clock) -> i64 {
    if test_mode {
        if let Some(raw) = headers.get(TEST_NOW_HEADER) {
            match raw.to_str().ok().and_then(|v| v.trim().parse::<i64>().ok()) {
                Some(now) => return now,
                None => {
                    tracing::debug!("Ignoring unparseable {} header: {:?}", TEST_NOW_HEADER, raw)
                }
            }
        }
    }
    clock.now_millis()
}

#[async_trait]
impl FromRequestParts<AppState> for RequestNow {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_now(
            &parts.headers,
            state.config.test_mode,
            state.clock.as_ref(),
        )))
    }
}
