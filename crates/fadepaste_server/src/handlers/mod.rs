//! HTTP request handlers.

/// Storage health endpoint.
pub mod health;
/// Paste create/read endpoints.
pub mod paste;
