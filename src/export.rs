//! Static export of the whole site.
//!
//! Renders every menu entry to its own `index.html` and copies the assets
//! the pages link to, so the result can be dropped on any file server:
//!
//! ```text
//! dist/
//! ├── index.html              # first menu item
//! ├── documents/
//! │   ├── index.html          # documents view
//! │   ├── license1/
//! │   │   └── license1.pdf    # copied documents, one folder per key
//! │   └── ...
//! ├── gallery/
//! │   ├── index.html          # gallery view
//! │   └── a.png               # copied photos
//! └── contacts/
//!     └── index.html
//! ```
//!
//! Without a session, each exported page is the site as seen with that menu
//! item selected; menu and quick navigation become plain links. Every link is
//! relative to the page it appears on, so the export also works from a
//! sub-path or straight from disk.

use crate::config;
use crate::documents::{self, DocumentKey};
use crate::gallery;
use crate::nav::{LinkMode, Menu, NavState};
use crate::render::{RenderContext, render_page};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What an export wrote, relative to the output directory.
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// `(menu label, written file)` in menu order.
    pub pages: Vec<(String, PathBuf)>,
    pub documents: Vec<PathBuf>,
    pub photos: Vec<PathBuf>,
    /// Document keys whose file was not found.
    pub missing_documents: Vec<DocumentKey>,
}

pub fn export(root: &Path, config_path: &Path, output: &Path) -> Result<ExportSummary, ExportError> {
    let settings = config::load(config_path);
    let menu = Menu::from_settings(&settings);
    let mut summary = ExportSummary::default();

    fs::create_dir_all(output)?;

    for (entry, url) in menu.entries().iter().zip(menu.static_paths()) {
        let state = NavState::resolve(Some(&entry.label), &menu);
        let ctx = RenderContext {
            settings: &settings,
            root,
            menu: &menu,
            state: &state,
            mode: LinkMode::static_at(&url),
        };
        let rel = PathBuf::from(url.trim_matches('/')).join("index.html");
        let target = output.join(&rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, render_page(&ctx).into_string())?;
        tracing::info!("Generated {}", rel.display());
        summary.pages.push((entry.label.clone(), rel));
    }

    for key in DocumentKey::ALL {
        let desc = documents::describe(key, &settings, root);
        if !desc.path.is_file() {
            summary.missing_documents.push(key);
            continue;
        }
        let rel = Path::new("documents").join(key.as_str()).join(&desc.filename);
        copy_into(&desc.path, &output.join(&rel))?;
        summary.documents.push(rel);
    }

    for photo in gallery::list(&settings, root) {
        let rel = Path::new("gallery").join(&photo.name);
        copy_into(&photo.path, &output.join(&rel))?;
        summary.photos.push(rel);
    }

    tracing::info!("Site exported to {}", output.display());
    Ok(summary)
}

fn copy_into(src: &Path, dst: &Path) -> std::io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    #[test]
    fn writes_one_page_per_menu_item() {
        let site = TestSite::new();
        let out = TempDir::new().unwrap();
        let summary = export(site.root(), &site.config_path(), out.path()).unwrap();

        let files: Vec<String> = summary
            .pages
            .iter()
            .map(|(_, p)| p.to_string_lossy().replace('\\', "/"))
            .collect();
        assert_eq!(
            files,
            [
                "index.html",
                "documents/index.html",
                "gallery/index.html",
                "contacts/index.html"
            ]
        );
        for file in &files {
            assert!(out.path().join(file).is_file(), "{file} not written");
        }
    }

    #[test]
    fn pages_mark_their_own_menu_item() {
        let site = TestSite::new();
        let out = TempDir::new().unwrap();
        export(site.root(), &site.config_path(), out.path()).unwrap();

        let gallery_page = fs::read_to_string(out.path().join("gallery/index.html")).unwrap();
        assert!(gallery_page.contains(r#"data-page="gallery""#));
        assert!(gallery_page.contains(r#"href="../contacts/""#));
        assert!(gallery_page.contains(r#"href="../""#));
        assert!(!gallery_page.contains("/navigate"));
    }

    #[test]
    fn links_are_relative_to_the_page() {
        let site = TestSite::new();
        site.write_document("tariff.pdf", b"%PDF-tariff");
        site.write_png("boiler #1.png", 2, 2);
        let out = TempDir::new().unwrap();
        export(site.root(), &site.config_path(), out.path()).unwrap();

        for page in ["index.html", "documents/index.html", "gallery/index.html"] {
            let html = fs::read_to_string(out.path().join(page)).unwrap();
            assert!(!html.contains(r#"href="/"#), "{page} has a root-absolute href");
            assert!(!html.contains(r#"src="/"#), "{page} has a root-absolute src");
        }

        let home = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(home.contains(r#"href="./gallery/""#));

        let docs = fs::read_to_string(out.path().join("documents/index.html")).unwrap();
        assert!(docs.contains(r#"href="../documents/tariff/tariff.pdf""#));

        let gallery = fs::read_to_string(out.path().join("gallery/index.html")).unwrap();
        assert!(gallery.contains(r#"src="../gallery/boiler%20%231.png""#));
        assert!(out.path().join("gallery/boiler #1.png").is_file());
    }

    #[test]
    fn documents_sharing_a_file_name_do_not_collide() {
        let site = TestSite::with_config(
            r#"
[documents.license1]
folder = "a"
filename = "scan.pdf"

[documents.license2]
folder = "b"
filename = "scan.pdf"
"#,
        );
        fs::create_dir_all(site.root().join("a")).unwrap();
        fs::create_dir_all(site.root().join("b")).unwrap();
        fs::write(site.root().join("a/scan.pdf"), b"first").unwrap();
        fs::write(site.root().join("b/scan.pdf"), b"second").unwrap();
        let out = TempDir::new().unwrap();
        let summary = export(site.root(), &site.config_path(), out.path()).unwrap();

        assert_eq!(summary.documents.len(), 2);
        assert_eq!(
            fs::read(out.path().join("documents/license1/scan.pdf")).unwrap(),
            b"first"
        );
        assert_eq!(
            fs::read(out.path().join("documents/license2/scan.pdf")).unwrap(),
            b"second"
        );
    }

    #[test]
    fn copies_documents_and_photos() {
        let site = TestSite::new();
        site.write_document("tariff.pdf", b"%PDF-tariff");
        site.write_png("a.png", 2, 2);
        site.write_photo("skip.txt", b"x");
        let out = TempDir::new().unwrap();
        let summary = export(site.root(), &site.config_path(), out.path()).unwrap();

        assert_eq!(
            summary.documents,
            [Path::new("documents").join("tariff").join("tariff.pdf")]
        );
        assert_eq!(summary.photos, [Path::new("gallery").join("a.png")]);
        assert_eq!(summary.missing_documents.len(), 3);
        assert_eq!(
            fs::read(out.path().join("documents/tariff/tariff.pdf")).unwrap(),
            b"%PDF-tariff"
        );
        assert!(!out.path().join("gallery/skip.txt").exists());

        let docs_page = fs::read_to_string(out.path().join("documents/index.html")).unwrap();
        assert!(docs_page.contains(r#"href="../documents/tariff/tariff.pdf""#));
    }
}
