//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// Canonical paste rows (`Paste`, bincode-encoded) keyed by id.
pub const PASTES: TableDefinition<&str, &[u8]> = TableDefinition::new("pastes");
