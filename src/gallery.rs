//! Photo gallery.
//!
//! Lists the files in `gallery.folder` whose name ends (case-insensitively)
//! in one of `gallery.supported_formats`, in lexicographic file-name order,
//! and renders each at full container width, one per row. The listing is
//! rebuilt on every render.
//!
//! Each photo is decoded far enough to read its dimensions, which go into
//! the `<img>` so the layout does not jump while images load. A photo that
//! fails to decode gets its own notice; the others still render. An absent
//! folder or a folder with no matching files shows the "no photos" notice.
//!
//! Photos are served only by name from the current listing, so a request
//! cannot reach outside the gallery folder.

use crate::config::Settings;
use crate::nav::LinkMode;
use maud::{Markup, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Photo not in gallery: {0}")]
    NotListed(String),
}

/// A gallery file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub name: String,
    pub path: PathBuf,
}

impl Photo {
    /// Content type guessed from the extension.
    pub fn media_type(&self) -> &'static str {
        image::ImageFormat::from_path(&self.path)
            .map(|f| f.to_mime_type())
            .unwrap_or("application/octet-stream")
    }

    /// Decode the image header and return `(width, height)`.
    pub fn dimensions(&self) -> Result<(u32, u32), GalleryError> {
        let reader = image::ImageReader::open(&self.path)?.with_guessed_format()?;
        Ok(reader.into_dimensions()?)
    }
}

pub fn folder(settings: &Settings, root: &Path) -> PathBuf {
    root.join(&settings.gallery.folder)
}

fn is_supported(name: &str, extensions: &[String]) -> bool {
    let lower = name.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&format!(".{ext}")))
}

/// Matching photos in file-name order. An absent or unreadable folder is an
/// empty gallery.
pub fn list(settings: &Settings, root: &Path) -> Vec<Photo> {
    let dir = folder(settings, root);
    if !dir.is_dir() {
        return Vec::new();
    }
    let entries = match fs::read_dir(&dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Cannot list gallery {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let extensions = settings.gallery.extensions();
    let mut photos: Vec<Photo> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter_map(|path| {
            let name = path.file_name()?.to_string_lossy().to_string();
            (!name.starts_with('.') && is_supported(&name, &extensions))
                .then_some(Photo { name, path })
        })
        .collect();

    photos.sort_by(|a, b| a.name.cmp(&b.name));
    photos
}

/// Look up a photo by file name in the current listing.
pub fn find(settings: &Settings, root: &Path, name: &str) -> Result<Photo, GalleryError> {
    list(settings, root)
        .into_iter()
        .find(|p| p.name == name)
        .ok_or_else(|| GalleryError::NotListed(name.to_string()))
}

fn render_photo(photo: &Photo, mode: LinkMode) -> Markup {
    match photo.dimensions() {
        Ok((width, height)) => html! {
            figure.gallery-item {
                img src=(mode.photo_href(&photo.name)) alt=(photo.name)
                    width=(width) height=(height);
            }
        },
        Err(e) => {
            tracing::warn!("Cannot decode {}: {}", photo.path.display(), e);
            html! {
                div.notice.notice-error { "Could not display photo " (photo.name) "." }
            }
        }
    }
}

/// Renders the gallery view.
pub fn render_view(settings: &Settings, root: &Path, mode: LinkMode) -> Markup {
    let photos = list(settings, root);
    html! {
        h2.section-header { "📸 Photo gallery" }
        @if photos.is_empty() {
            div.notice.notice-info { "📷 There are no photos in the gallery yet." }
        } @else {
            div.gallery {
                @for photo in &photos {
                    (render_photo(photo, mode))
                }
            }
        }
    }
}
