//! Document viewer for the published PDFs.
//!
//! Four logical documents (three licenses and the tariff) are mapped by
//! `[documents.<key>]` to `folder/filename` under the site root. Nothing is
//! cached: every render and every download reads the file again, so a
//! replaced PDF shows up on the next request.
//!
//! Each document tab shows, in order:
//!
//! 1. the full title;
//! 2. a download action returning the exact bytes on disk;
//! 3. either an inline preview (the PDF embedded as a `data:` URL, 800px
//!    tall) or, above `settings.max_pdf_size_mb`, a warning pointing at the
//!    download.
//!
//! Download and inline preview are separate paths: [`download`] serves bytes
//! and fails with [`DocumentError`], [`inline_preview`] only ever sees bytes
//! that were already read and checked against the size limit.
//!
//! Failures stay inside the tab. A missing file renders a "not found" notice
//! without attempting a read; a read error renders a generic message and a
//! hint to use the download action.

use crate::config::{DocumentConfig, DocumentsConfig, Settings};
use crate::nav::LinkMode;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Height of the inline preview frame.
const PREVIEW_HEIGHT: &str = "800px";

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Unknown document: {0}")]
    UnknownKey(String),
    #[error("Document not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Logical document key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKey {
    License1,
    License2,
    License3,
    Tariff,
}

impl DocumentKey {
    /// Tab order on the documents page.
    pub const ALL: [DocumentKey; 4] = [
        DocumentKey::License1,
        DocumentKey::License2,
        DocumentKey::License3,
        DocumentKey::Tariff,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentKey::License1 => "license1",
            DocumentKey::License2 => "license2",
            DocumentKey::License3 => "license3",
            DocumentKey::Tariff => "tariff",
        }
    }

    pub fn parse(key: &str) -> Result<Self, DocumentError> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| DocumentError::UnknownKey(key.to_string()))
    }

    fn config(self, documents: &DocumentsConfig) -> &DocumentConfig {
        match self {
            DocumentKey::License1 => &documents.license1,
            DocumentKey::License2 => &documents.license2,
            DocumentKey::License3 => &documents.license3,
            DocumentKey::Tariff => &documents.tariff,
        }
    }
}

/// Where a document lives and how it is labelled. Derived per render.
#[derive(Debug, Clone)]
pub struct DocumentDescriptor {
    pub key: DocumentKey,
    pub title: String,
    pub full_title: String,
    pub filename: String,
    pub path: PathBuf,
}

pub fn describe(key: DocumentKey, settings: &Settings, root: &Path) -> DocumentDescriptor {
    let doc = key.config(&settings.documents);
    DocumentDescriptor {
        key,
        title: doc.title.clone(),
        full_title: doc.full_title.clone(),
        filename: doc.filename.clone(),
        path: root.join(&doc.folder).join(&doc.filename),
    }
}

/// Bytes offered by the download action.
#[derive(Debug)]
pub struct Download {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl Download {
    pub fn media_type(&self) -> &'static str {
        PDF_MEDIA_TYPE
    }
}

/// Read a document in full. Missing files are reported as
/// [`DocumentError::NotFound`] without touching the file.
pub fn read(desc: &DocumentDescriptor) -> Result<Vec<u8>, DocumentError> {
    if !desc.path.is_file() {
        return Err(DocumentError::NotFound(desc.path.clone()));
    }
    Ok(fs::read(&desc.path)?)
}

/// The download action: the exact bytes on disk under the configured name.
pub fn download(desc: &DocumentDescriptor) -> Result<Download, DocumentError> {
    let bytes = read(desc)?;
    Ok(Download {
        filename: desc.filename.clone(),
        bytes,
    })
}

pub fn size_mb(len: usize) -> f64 {
    len as f64 / BYTES_PER_MB
}

/// Whether a document of `len` bytes may be previewed inline.
/// A document exactly at the limit is previewed.
pub fn fits_inline(len: usize, max_mb: f64) -> bool {
    size_mb(len) <= max_mb
}

/// What a render of this document would show, from file metadata alone.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentStatus {
    Missing,
    Inline { bytes: u64 },
    TooLarge { bytes: u64 },
    Unreadable(String),
}

pub fn status(desc: &DocumentDescriptor, max_mb: f64) -> DocumentStatus {
    if !desc.path.is_file() {
        return DocumentStatus::Missing;
    }
    match fs::metadata(&desc.path) {
        Ok(meta) => {
            let bytes = meta.len();
            if fits_inline(bytes as usize, max_mb) {
                DocumentStatus::Inline { bytes }
            } else {
                DocumentStatus::TooLarge { bytes }
            }
        }
        Err(e) => DocumentStatus::Unreadable(e.to_string()),
    }
}

/// Embed already-read PDF bytes directly in the page.
pub fn inline_preview(bytes: &[u8]) -> Markup {
    let src = format!("data:{};base64,{}", PDF_MEDIA_TYPE, STANDARD.encode(bytes));
    html! {
        embed.pdf-viewer src=(src) type=(PDF_MEDIA_TYPE) width="100%" height=(PREVIEW_HEIGHT);
    }
}

fn download_control(desc: &DocumentDescriptor, mode: LinkMode) -> Markup {
    let label = if desc.key == DocumentKey::Tariff {
        "⬇️ Download tariff"
    } else {
        "⬇️ Download document"
    };
    html! {
        div.document-actions {
            a.btn href=(mode.download_href(desc.key, &desc.filename)) download=(desc.filename) {
                (label)
            }
        }
    }
}

/// Tab body for the outcome of reading `desc`.
fn render_body(
    desc: &DocumentDescriptor,
    read: Result<Vec<u8>, DocumentError>,
    max_mb: f64,
    mode: LinkMode,
) -> Markup {
    match read {
        Err(DocumentError::NotFound(_)) => html! {
            div.notice.notice-warning { "📄 Document not found." }
        },
        Err(e) => {
            tracing::error!("Failed to read {}: {}", desc.path.display(), e);
            html! {
                (download_control(desc, mode))
                div.notice.notice-error { "Could not display the document." }
                div.notice.notice-info {
                    "💡 Please use the download button to view the document."
                }
            }
        }
        Ok(bytes) => html! {
            (download_control(desc, mode))
            h4 { "📄 Document preview:" }
            @if fits_inline(bytes.len(), max_mb) {
                (inline_preview(&bytes))
            } @else {
                div.notice.notice-warning {
                    "📄 The file is too large ("
                    (format!("{:.1}", size_mb(bytes.len())))
                    " MB) to preview in the browser. Please download it to view."
                }
            }
        },
    }
}

/// Renders one document tab body.
pub fn render(key: DocumentKey, settings: &Settings, root: &Path, mode: LinkMode) -> Markup {
    let desc = describe(key, settings, root);
    let body = render_body(&desc, read(&desc), settings.limits.max_pdf_size_mb, mode);

    html! {
        div.document-section {
            h4.document-title { (desc.full_title) }
            (body)
        }
    }
}

/// Renders the documents view: one CSS-only tab per document, first open.
pub fn render_view(settings: &Settings, root: &Path, mode: LinkMode) -> Markup {
    html! {
        h2.section-header { "📑 Official documents" }
        div.doc-tabs {
            @for (i, key) in DocumentKey::ALL.into_iter().enumerate() {
                @let id = format!("tab-{}", key.as_str());
                input.tab-radio type="radio" name="doc-tab" id=(id) checked[i == 0];
                label.tab-btn for=(id) {
                    (describe(key, settings, root).title)
                }
            }
            div.tab-panels {
                @for key in DocumentKey::ALL {
                    div.tab-content id={ "doc-" (key.as_str()) } {
                        (render(key, settings, root, mode))
                    }
                }
            }
        }
    }
}
