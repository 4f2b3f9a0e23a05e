//! Data models for pastes.

/// Paste row, create payload and response shapes.
pub mod paste;

#[cfg(test)]
mod tests;
