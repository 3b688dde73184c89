//! Site inspection for the `check` command.
//!
//! Gathers what a render would show without rendering anything: whether the
//! config parses, which view each menu label opens, the state of every
//! document and whether each gallery photo decodes. Unlike a render, a broken
//! config is reported rather than silently replaced by the defaults.

use crate::config::{self, Settings};
use crate::documents::{self, DocumentDescriptor, DocumentKey, DocumentStatus};
use crate::gallery;
use crate::nav::{Menu, MenuEntry};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ConfigStatus {
    /// No config file; defaults apply.
    Absent,
    Loaded,
    /// The file exists but a render would ignore it.
    Invalid(String),
}

#[derive(Debug)]
pub struct DocumentReport {
    pub key: DocumentKey,
    pub title: String,
    pub path: PathBuf,
    pub status: DocumentStatus,
}

#[derive(Debug)]
pub struct PhotoReport {
    pub name: String,
    /// Pixel size, or the decode error.
    pub dimensions: Result<(u32, u32), String>,
}

#[derive(Debug)]
pub struct SiteReport {
    pub config_path: PathBuf,
    pub config: ConfigStatus,
    pub menu: Vec<MenuEntry>,
    pub max_pdf_size_mb: f64,
    pub documents: Vec<DocumentReport>,
    pub gallery_folder: PathBuf,
    pub photos: Vec<PhotoReport>,
}

impl SiteReport {
    pub fn has_problems(&self) -> bool {
        matches!(self.config, ConfigStatus::Invalid(_))
            || self
                .documents
                .iter()
                .any(|d| matches!(d.status, DocumentStatus::Unreadable(_)))
            || self.photos.iter().any(|p| p.dimensions.is_err())
    }
}

pub fn inspect(root: &Path, config_path: &Path) -> SiteReport {
    let (config, settings) = match config::try_load(config_path) {
        Ok(Some(settings)) => (ConfigStatus::Loaded, settings),
        Ok(None) => (ConfigStatus::Absent, Settings::default()),
        Err(e) => (ConfigStatus::Invalid(e.to_string()), Settings::default()),
    };

    let menu = Menu::from_settings(&settings).entries().to_vec();
    let max = settings.limits.max_pdf_size_mb;

    let documents = DocumentKey::ALL
        .into_iter()
        .map(|key| {
            let desc: DocumentDescriptor = documents::describe(key, &settings, root);
            DocumentReport {
                key,
                status: documents::status(&desc, max),
                title: desc.title,
                path: desc.path,
            }
        })
        .collect();

    let photos = gallery::list(&settings, root)
        .into_iter()
        .map(|photo| PhotoReport {
            dimensions: photo.dimensions().map_err(|e| e.to_string()),
            name: photo.name,
        })
        .collect();

    SiteReport {
        config_path: config_path.to_path_buf(),
        config,
        menu,
        max_pdf_size_mb: max,
        documents,
        gallery_folder: gallery::folder(&settings, root),
        photos,
    }
}
