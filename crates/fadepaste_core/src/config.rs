//! Configuration loading from environment variables.
//!
//! Parsing goes through a key lookup so the same code reads the process
//! environment in production and a plain map in tests.

use crate::constants::{DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT, TEST_MODE_ENV};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Which [`crate::PasteStore`] adapter backs the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    /// Durable redb file under `db_path`.
    Redb,
    /// Process-local map; contents vanish on restart.
    Memory,
}

impl StorageKind {
    /// Parse a `STORAGE` value. Matching is case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "redb" | "" => Some(Self::Redb),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// Runtime configuration for fadepaste.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub storage: StorageKind,
    pub port: u16,
    /// Full listener address from `BIND`; overrides `127.0.0.1:port`.
    pub bind: Option<SocketAddr>,
    pub max_paste_size: usize,
    /// Base used when building share URLs, e.g. `https://paste.example.com`.
    pub public_url: Option<String>,
    /// Honour the `x-test-now-ms` header.
    pub test_mode: bool,
}

/// Expand a leading `~/` against `home`.
fn expand_tilde(path: String, home: Option<&PathBuf>) -> String {
    match (path.strip_prefix("~/"), home) {
        (Some(rest), Some(home)) => home.join(rest).to_string_lossy().to_string(),
        _ => path,
    }
}

fn resolve_home_dir(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    ["HOME", "USERPROFILE"]
        .into_iter()
        .filter_map(lookup)
        .find(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| env::current_dir().ok())
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn normalize_public_url(raw: String) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_bind(raw: String, port: u16) -> Option<SocketAddr> {
    match raw.trim().parse::<SocketAddr>() {
        Ok(addr) => Some(addr),
        Err(err) => {
            tracing::warn!(
                "Invalid BIND='{}': {}. Falling back to 127.0.0.1:{}",
                raw,
                err,
                port
            );
            None
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary `key -> value` source.
    ///
    /// Unparseable values fall back to their defaults; unknown `STORAGE`
    /// and invalid `BIND` values are logged.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let storage = match lookup("STORAGE") {
            Some(value) => StorageKind::parse(&value).unwrap_or_else(|| {
                tracing::warn!("Unknown STORAGE='{}'; falling back to redb", value);
                StorageKind::Redb
            }),
            None => StorageKind::Redb,
        };

        let home = resolve_home_dir(&lookup);
        let db_path = match lookup("DB_PATH") {
            Some(path) => expand_tilde(path, home.as_ref()),
            None => home
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".cache")
                .join("fadepaste")
                .join("db")
                .to_string_lossy()
                .to_string(),
        };

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            db_path,
            storage,
            port,
            bind: lookup("BIND").and_then(|raw| parse_bind(raw, port)),
            max_paste_size: lookup("MAX_PASTE_SIZE")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_MAX_PASTE_SIZE),
            public_url: lookup("PUBLIC_URL").and_then(normalize_public_url),
            test_mode: lookup(TEST_MODE_ENV)
                .and_then(|value| parse_env_flag(&value))
                .unwrap_or(false),
        }
    }

    /// Listener address: `BIND` when set, otherwise `127.0.0.1:PORT`.
    pub fn bind_address(&self) -> SocketAddr {
        self.bind
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], self.port)))
    }
}
