//! Paste data models.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Paste row stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paste {
    pub id: String,
    pub content: String,
    pub ttl_seconds: Option<u64>,
    pub max_views: Option<u64>,
    /// Creation time in epoch milliseconds.
    pub created_at: i64,
    pub views: u64,
}

impl Paste {
    /// Create a never-viewed paste with a fresh UUID v4 id.
    ///
    /// # Arguments
    /// - `new`: Validated creation input.
    /// - `created_at`: Creation time in epoch milliseconds.
    ///
    /// # Returns
    /// A new [`Paste`] instance.
    pub fn new(new: NewPaste, created_at: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content: new.content,
            ttl_seconds: new.ttl_seconds,
            max_views: new.max_views,
            created_at,
            views: 0,
        }
    }
}

/// Creation input that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPaste {
    pub content: String,
    pub ttl_seconds: Option<u64>,
    pub max_views: Option<u64>,
}

/// Raw request payload for creating a paste.
///
/// Fields stay untyped so that wrong JSON types surface as validation
/// errors with a field-specific message instead of a generic body error.
/// `None` means the key was absent; an explicit `null` is `Some(Value::Null)`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct CreatePasteRequest {
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub ttl_seconds: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub max_views: Option<Value>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Response body for a created paste.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePasteResponse {
    pub id: String,
    pub url: String,
}

/// Response body for a successful read.
///
/// `remaining_views` and `expires_at` serialize as `null` when the paste has
/// no view cap or no TTL respectively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasteView {
    pub content: String,
    pub remaining_views: Option<u64>,
    pub expires_at: Option<String>,
}
