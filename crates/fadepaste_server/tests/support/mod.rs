//! Shared integration-test server bootstrap helpers.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use fadepaste_core::{FixedClock, PasteDb, StorageKind, TEST_NOW_HEADER};
use fadepaste_server::{create_app, AppState, Config, PasteStore};
use std::sync::Arc;
use tempfile::TempDir;

/// Wall-clock stand-in used by every integration test server.
pub(crate) const T0: i64 = 1_700_000_000_000;

pub(crate) fn test_config(db_path: &str, test_mode: bool) -> Config {
    Config {
        db_path: db_path.to_string(),
        storage: StorageKind::Redb,
        port: 0,
        bind: None,
        max_paste_size: 64 * 1024,
        public_url: None,
        test_mode,
    }
}

pub(crate) fn test_server_for_store(config: Config, store: Arc<dyn PasteStore>) -> TestServer {
    let state = AppState::with_clock(config, store, Arc::new(FixedClock::new(T0)));
    TestServer::new(create_app(state)).expect("server")
}

fn setup(test_mode: bool) -> (TestServer, TempDir) {
    let temp_dir = TempDir::new().expect("temp dir");
    let db_path = temp_dir.path().join("db");
    let db_path = db_path.to_str().expect("db path");
    let store = Arc::new(PasteDb::open(db_path).expect("open db"));
    let server = test_server_for_store(test_config(db_path, test_mode), store);
    (server, temp_dir)
}

/// Server with `TEST_MODE` enabled, clock pinned at [`T0`].
pub(crate) fn setup_test_server() -> (TestServer, TempDir) {
    setup(true)
}

/// Server with `TEST_MODE` disabled, clock pinned at [`T0`].
pub(crate) fn setup_server_without_test_mode() -> (TestServer, TempDir) {
    setup(false)
}

pub(crate) fn now_header(now: i64) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(TEST_NOW_HEADER),
        HeaderValue::from_str(&now.to_string()).expect("header value"),
    )
}
