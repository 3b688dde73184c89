//! Shared test utilities for the site test suite.
//!
//! [`TestSite`] is a throwaway site root in a temp directory with helpers to
//! drop a config, documents and photos into it.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = TestSite::with_config("[settings]\nmax_pdf_size_mb = 1\n");
//! site.write_document("tariff.pdf", b"%PDF-1.4");
//! site.write_png("a.png", 4, 3);
//!
//! let settings = site.settings();
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::{self, CONFIG_FILE, Settings};

pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    /// Empty site root: no config, no documents, no photos.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Site root with the given `config.toml`.
    pub fn with_config(toml: &str) -> Self {
        let site = Self::new();
        site.write_config(toml);
        site
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.root().join(CONFIG_FILE)
    }

    pub fn write_config(&self, toml: &str) {
        fs::write(self.config_path(), toml).unwrap();
    }

    /// Settings as a render would load them.
    pub fn settings(&self) -> Settings {
        config::load(&self.config_path())
    }

    /// Write a file into the default `documents/` folder.
    pub fn write_document(&self, filename: &str, bytes: &[u8]) -> PathBuf {
        self.write_file("documents", filename, bytes)
    }

    /// Write raw bytes into the default `photos/` folder.
    pub fn write_photo(&self, filename: &str, bytes: &[u8]) -> PathBuf {
        self.write_file("photos", filename, bytes)
    }

    /// Write a real, decodable PNG into the default `photos/` folder.
    pub fn write_png(&self, filename: &str, width: u32, height: u32) -> PathBuf {
        let dir = self.root().join("photos");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(filename);
        image::RgbImage::new(width, height)
            .save_with_format(&path, image::ImageFormat::Png)
            .unwrap();
        path
    }

    fn write_file(&self, folder: &str, filename: &str, bytes: &[u8]) -> PathBuf {
        let dir = self.root().join(folder);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(filename);
        fs::write(&path, bytes).unwrap();
        path
    }
}
