//! HTTP server wiring for fadepaste (API, rendered view, shared state).

/// Per-request time resolution.
pub mod clock;
/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for paste and health endpoints.
pub mod handlers;

pub use fadepaste_core::{
    config, db, lifecycle, models, paste_ops, AppError, Clock, Config, PasteStore, SystemClock,
    DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};

const CONTENT_SECURITY_POLICY: &str = concat!(
    "default-src 'none'; style-src 'unsafe-inline'; ",
    "frame-ancestors 'none'; base-uri 'none'; form-action 'none'"
);

/// Slack on top of `max_paste_size` for JSON escaping and the other fields.
const BODY_LIMIT_OVERHEAD: usize = 64 * 1024;

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PasteStore>,
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Construct shared application state driven by the wall clock.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    /// - `store`: Open paste store.
    pub fn new(config: Config, store: Arc<dyn PasteStore>) -> Self {
        Self::with_clock(config, store, Arc::new(SystemClock))
    }

    /// Construct shared application state with an explicit clock.
    pub fn with_clock(config: Config, store: Arc<dyn PasteStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config: Arc::new(config),
            clock,
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_paste_size
        .saturating_mul(2)
        .saturating_add(BODY_LIMIT_OVERHEAD);

    Router::new()
        .route("/api/healthz", get(handlers::health::healthz))
        .route("/api/pastes", post(handlers::paste::create_paste))
        .route("/api/pastes/:id", get(handlers::paste::get_paste))
        .route("/p/:id", get(handlers::paste::view_paste_page))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(SetResponseHeaderLayer::overriding(
                    header::CONTENT_SECURITY_POLICY,
                    HeaderValue::from_static(CONTENT_SECURITY_POLICY),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_CONTENT_TYPE_OPTIONS,
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::overriding(
                    header::X_FRAME_OPTIONS,
                    HeaderValue::from_static("DENY"),
                )),
        )
}

/// Run the Axum server with graceful shutdown support.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}
