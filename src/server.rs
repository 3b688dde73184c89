//! HTTP surface of the live site.
//!
//! ## Routes
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | The page for the session's current navigation state |
//! | `POST /navigate` | Menu selection or quick navigation (`page=<label>`), then `303` to `/` |
//! | `GET /documents/{key}/download` | Exact document bytes as `application/pdf` attachment |
//! | `GET /gallery/{name}` | A photo from the current gallery listing |
//! | `GET /health` | Liveness check |
//!
//! ## Session state
//!
//! The session's current page lives in the `current_page` cookie as the
//! URL-safe base64 of the menu label, so there is no server-side session
//! table and nothing shared between sessions except the read-only files.
//! Settings are loaded again on every request, so edits to `config.toml`
//! and to the asset folders show up on the next render.

use crate::config::{self, Settings};
use crate::documents::{self, DocumentError, DocumentKey};
use crate::gallery;
use crate::nav::{LinkMode, Menu, NavState};
use crate::render::{RenderContext, render_page};
use axum::Router;
use axum::extract::{Form, Path as UrlPath, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use maud::Markup;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Cookie holding the session's current page.
pub const SESSION_COOKIE: &str = "current_page";

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where the site lives on disk. Cheap to clone into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    inner: Arc<SitePaths>,
}

#[derive(Debug)]
struct SitePaths {
    root: PathBuf,
    config_path: PathBuf,
}

impl AppState {
    pub fn new(root: PathBuf, config_path: PathBuf) -> Self {
        Self {
            inner: Arc::new(SitePaths { root, config_path }),
        }
    }

    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    fn settings(&self) -> Settings {
        config::load(&self.inner.config_path)
    }
}

pub fn encode_label(label: &str) -> String {
    URL_SAFE_NO_PAD.encode(label.as_bytes())
}

/// Decode a cookie value; anything malformed counts as no stored page.
pub fn decode_label(value: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    String::from_utf8(bytes).ok()
}

fn stored_label(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).and_then(|c| decode_label(c.value()))
}

fn session_cookie(label: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, encode_label(label)))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// RFC 5987 `attr-char`: everything else is percent-encoded in `filename*`.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// `Content-Disposition` for a download, with an ASCII fallback name and
/// the exact name in RFC 5987 form.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() && c != '"' && c != '\\') || c == ' ' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(filename, ATTR_CHAR);
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/navigate", post(navigate))
        .route("/documents/:key/download", get(download))
        .route("/gallery/:name", get(photo))
        .route("/health", get(health))
        .with_state(state)
}

/// Bind and serve until the process is stopped.
pub async fn serve(addr: SocketAddr, state: AppState) -> Result<(), ServeError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        "Serving {} on http://{}",
        state.root().display(),
        listener.local_addr()?
    );
    axum::serve(listener, router(state)).await?;
    Ok(())
}

async fn index(State(app): State<AppState>, jar: CookieJar) -> (CookieJar, Markup) {
    let settings = app.settings();
    let menu = Menu::from_settings(&settings);
    let stored = stored_label(&jar);
    let state = NavState::resolve(stored.as_deref(), &menu);

    // Write back a repaired or first-visit state so the next request agrees.
    let jar = if stored.as_deref() == Some(state.current()) {
        jar
    } else {
        jar.add(session_cookie(state.current()))
    };

    let ctx = RenderContext {
        settings: &settings,
        root: app.root(),
        menu: &menu,
        state: &state,
        mode: LinkMode::Live,
    };
    (jar, render_page(&ctx))
}

#[derive(Debug, Deserialize)]
pub struct NavigateForm {
    pub page: String,
}

async fn navigate(
    State(app): State<AppState>,
    jar: CookieJar,
    Form(form): Form<NavigateForm>,
) -> (CookieJar, Redirect) {
    let settings = app.settings();
    let menu = Menu::from_settings(&settings);
    let current = NavState::resolve(stored_label(&jar).as_deref(), &menu);
    let next = current.select(&form.page, &menu).unwrap_or_else(|| {
        tracing::debug!("Ignoring navigation to unknown page {:?}", form.page);
        current
    });
    (jar.add(session_cookie(next.current())), Redirect::to("/"))
}

async fn download(State(app): State<AppState>, UrlPath(key): UrlPath<String>) -> Response {
    let Ok(key) = DocumentKey::parse(&key) else {
        return (StatusCode::NOT_FOUND, "Unknown document").into_response();
    };
    let settings = app.settings();
    let desc = documents::describe(key, &settings, app.root());
    match documents::download(&desc) {
        Ok(dl) => (
            [
                (header::CONTENT_TYPE, dl.media_type().to_string()),
                (header::CONTENT_DISPOSITION, content_disposition(&dl.filename)),
            ],
            dl.bytes,
        )
            .into_response(),
        Err(DocumentError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, "Document not found").into_response()
        }
        Err(e) => {
            tracing::error!("Failed to read {}: {}", desc.path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Could not read document").into_response()
        }
    }
}

async fn photo(State(app): State<AppState>, UrlPath(name): UrlPath<String>) -> Response {
    let settings = app.settings();
    let photo = match gallery::find(&settings, app.root(), &name) {
        Ok(photo) => photo,
        Err(_) => return (StatusCode::NOT_FOUND, "Photo not found").into_response(),
    };
    match std::fs::read(&photo.path) {
        Ok(bytes) => ([(header::CONTENT_TYPE, photo.media_type())], bytes).into_response(),
        Err(e) => {
            tracing::error!("Failed to read {}: {}", photo.path.display(), e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Could not read photo").into_response()
        }
    }
}

async fn health() -> &'static str {
    "ok"
}
