//! Paste HTTP handlers.

use crate::{clock::RequestNow, error::HttpError, AppError, AppState, Config};
use askama::Template;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use fadepaste_core::models::paste::{CreatePasteRequest, CreatePasteResponse, PasteView};
use fadepaste_core::paste_ops;

#[derive(Template)]
#[template(path = "paste.html")]
struct PasteTemplate<'a> {
    content: &'a str,
}

/// Build the shareable page URL for `id`.
///
/// Uses `PUBLIC_URL` when configured, otherwise the request's `Host` header.
pub(crate) fn share_url(config: &Config, headers: &HeaderMap, id: &str) -> String {
    let base = match config.public_url.as_deref() {
        Some(public_url) => public_url.to_string(),
        None => {
            let host = headers
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("localhost:{}", config.port));
            format!("http://{}", host)
        }
    };
    format!("{}/p/{}", base, id)
}

/// Create a new paste.
///
/// # Returns
/// `{id, url}` for the stored paste.
///
/// # Errors
/// 400 for malformed bodies or invalid fields, 500 when storage fails.
pub async fn create_paste(
    State(state): State<AppState>,
    RequestNow(now): RequestNow,
    headers: HeaderMap,
    payload: Result<Json<CreatePasteRequest>, JsonRejection>,
) -> Result<Json<CreatePasteResponse>, HttpError> {
    let Json(req) = payload?;
    let paste = paste_ops::create_paste(
        state.store.as_ref(),
        req,
        state.config.max_paste_size,
        now,
    )?;

    let url = share_url(&state.config, &headers, &paste.id);
    Ok(Json(CreatePasteResponse { id: paste.id, url }))
}

/// Read a paste as JSON, counting the view.
///
/// # Errors
/// 404 when the paste is missing, expired or out of views.
pub async fn get_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequestNow(now): RequestNow,
) -> Result<Json<PasteView>, HttpError> {
    Ok(Json(paste_ops::read_paste(state.store.as_ref(), &id, now)?))
}

/// Read a paste as an HTML page, counting the view.
pub async fn view_paste_page(
    State(state): State<AppState>,
    Path(id): Path<String>,
    RequestNow(now): RequestNow,
) -> Response {
    match paste_ops::read_paste(state.store.as_ref(), &id, now) {
        Ok(view) => render_page(&view),
        Err(AppError::NotFound) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        Err(err) => {
            tracing::error!("Failed to load paste page {}: {}", id, err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
        }
    }
}

fn render_page(view: &PasteView) -> Response {
    let template = PasteTemplate {
        content: &view.content,
    };
    match template.render() {
        Ok(body) => Html(body).into_response(),
        Err(err) => {
            tracing::error!("Failed to render paste page: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
        }
    }
}
