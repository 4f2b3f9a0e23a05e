//! Shared constants used across fadepaste crates.

/// Default API port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default maximum paste size accepted by the API layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 1024 * 1024;

/// Request header carrying the injected current time (epoch millis) in test mode.
pub const TEST_NOW_HEADER: &str = "x-test-now-ms";

/// Environment flag that enables [`TEST_NOW_HEADER`].
pub const TEST_MODE_ENV: &str = "TEST_MODE";

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Number of ids tried before giving up on an insert that keeps colliding.
pub const MAX_ID_ATTEMPTS: usize = 3;
