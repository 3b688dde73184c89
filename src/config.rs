//! Site configuration module.
//!
//! Everything the site shows comes from a single `config.toml` in the site
//! root. The file is sparse: any key may be left out, and a missing or broken
//! file never takes the site down. Stock defaults are the base layer and the
//! user's file is merged on top of them before deserializing, so a section
//! that sets only one key still gets the per-section defaults for the rest
//! (for example `[documents.tariff]` with only `filename` keeps the tariff's
//! own title).
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [company]
//! name = "Company name"
//! icon = "🔥"
//! description = "A description of the company will be added soon."
//! tagline = "Warmth for your comfort"
//! # additional_info = "Second paragraph on the home page"
//!
//! [theme]
//! primary_color = "#FF6B35"
//! secondary_color = "#E55A2B"
//! text_color = "#2E4053"
//! background_light = "#F0F2F6"
//! text_muted = "#5D6D7E"
//! style_variant = "classic"   # classic|modern|minimal|corporate|rounded|sidebar
//!
//! [[menu.items]]
//! icon = "🏠"
//! label = "Home"
//! page = "home"               # optional; inferred from position when absent
//!
//! [contacts]
//! # phone = "+380 00 000 00 00"
//! # email = "info@example.com"
//! # address = "1 Main Street"
//!
//! [documents.license1]
//! title = "License 1"
//! full_title = "License 1"
//! folder = "documents"
//! filename = "license1.pdf"
//!
//! [gallery]
//! folder = "photos"
//! supported_formats = [".png", ".jpg", ".jpeg"]
//!
//! [settings]
//! max_pdf_size_mb = 10
//!
//! [footer]
//! # copyright = "© 2024 Company name. All rights reserved."
//! show_tagline = false
//! ```
//!
//! Unknown keys are ignored. A file that is not valid TOML, or whose values
//! have the wrong type, is treated as absent by [`load`]; [`try_load`] exposes
//! the error for the `check` command.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name of the site configuration, relative to the site root.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Fully-defaulted site settings.
///
/// Built once per render from the stock defaults plus the user's file. Every
/// field is always populated, so renderers never carry their own fallbacks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub company: CompanyConfig,
    pub theme: ThemeConfig,
    pub menu: MenuConfig,
    pub contacts: ContactsConfig,
    pub documents: DocumentsConfig,
    pub gallery: GalleryConfig,
    /// The `[settings]` section of the file.
    #[serde(rename = "settings")]
    pub limits: LimitsConfig,
    pub footer: FooterConfig,
}

impl Settings {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let max = self.limits.max_pdf_size_mb;
        if !max.is_finite() || max < 0.0 {
            return Err(ConfigError::Validation(
                "settings.max_pdf_size_mb must be a non-negative number".into(),
            ));
        }
        Ok(())
    }

    /// Configured menu items, or the stock four when the list is empty.
    ///
    /// Items without a label cannot be selected and are dropped.
    pub fn menu_items(&self) -> Vec<MenuItem> {
        let items: Vec<MenuItem> = self
            .menu
            .items
            .iter()
            .filter(|item| !item.label.trim().is_empty())
            .cloned()
            .collect();
        if items.is_empty() {
            MenuConfig::default().items
        } else {
            items
        }
    }

    /// Footer copyright line; derived from the company name when unset.
    pub fn copyright(&self) -> String {
        match &self.footer.copyright {
            Some(text) if !text.trim().is_empty() => text.clone(),
            _ => format!("© 2024 {}. All rights reserved.", self.company.name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    pub name: String,
    /// Emoji shown before the name in the header and the tagline.
    pub icon: String,
    /// Markdown shown on the home page.
    pub description: String,
    pub tagline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_info: Option<String>,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Company name".to_string(),
            icon: "🔥".to_string(),
            description: "A description of the company will be added soon.".to_string(),
            tagline: "Warmth for your comfort".to_string(),
            additional_info: None,
        }
    }
}

/// Colour tokens and layout variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub primary_color: String,
    pub secondary_color: String,
    pub text_color: String,
    pub background_light: String,
    pub text_muted: String,
    /// Name of a [`crate::theme::StyleVariant`]; unknown names render as classic.
    pub style_variant: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary_color: "#FF6B35".to_string(),
            secondary_color: "#E55A2B".to_string(),
            text_color: "#2E4053".to_string(),
            background_light: "#F0F2F6".to_string(),
            text_muted: "#5D6D7E".to_string(),
            style_variant: "classic".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub items: Vec<MenuItem>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            items: vec![
                MenuItem::new("🏠", "Home", "home"),
                MenuItem::new("📄", "Documents", "documents"),
                MenuItem::new("📸", "Gallery", "gallery"),
                MenuItem::new("📞", "Contacts", "contacts"),
            ],
        }
    }
}

/// One entry of the side navigation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuItem {
    pub icon: String,
    pub label: String,
    /// View opened by this item (`home`, `documents`, `gallery`, `contacts`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
}

impl MenuItem {
    fn new(icon: &str, label: &str, page: &str) -> Self {
        Self {
            icon: icon.to_string(),
            label: label.to_string(),
            page: Some(page.to_string()),
        }
    }
}

/// Contact fields. Unset fields are hidden in the sidebar and shown as
/// placeholder text on the contacts page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// The four published documents, one section per logical key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    pub license1: DocumentConfig,
    pub license2: DocumentConfig,
    pub license3: DocumentConfig,
    pub tariff: DocumentConfig,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            license1: DocumentConfig::new("License 1", "License 1", "license1.pdf"),
            license2: DocumentConfig::new("License 2", "License 2", "license2.pdf"),
            license3: DocumentConfig::new("License 3", "License 3", "license3.pdf"),
            tariff: DocumentConfig::new(
                "Heating tariffs",
                "Heat supply service tariff",
                "tariff.pdf",
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Short label used on the tab.
    pub title: String,
    /// Heading shown above the document.
    pub full_title: String,
    /// Folder relative to the site root.
    pub folder: String,
    pub filename: String,
}

impl DocumentConfig {
    fn new(title: &str, full_title: &str, filename: &str) -> Self {
        Self {
            title: title.to_string(),
            full_title: full_title.to_string(),
            folder: "documents".to_string(),
            filename: filename.to_string(),
        }
    }
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self::new("Document", "Document", "document.pdf")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Folder relative to the site root.
    pub folder: String,
    /// Extensions with a leading dot, matched case-insensitively.
    pub supported_formats: Vec<String>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            folder: "photos".to_string(),
            supported_formats: vec![".png".into(), ".jpg".into(), ".jpeg".into()],
        }
    }
}

impl GalleryConfig {
    /// Supported extensions normalized to lowercase without the leading dot.
    pub fn extensions(&self) -> Vec<String> {
        self.supported_formats
            .iter()
            .map(|f| f.trim().trim_start_matches('.').to_lowercase())
            .filter(|f| !f.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Documents larger than this are offered for download only.
    pub max_pdf_size_mb: f64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_pdf_size_mb: 10.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    pub show_tagline: bool,
}

// =============================================================================
// Config loading and merging
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Settings::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely; arrays such
///   as `menu.items` are replaced, not appended to.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge a parsed user file onto the stock defaults, deserialize and validate.
pub fn resolve(overlay: toml::Value) -> Result<Settings, ConfigError> {
    let merged = merge_toml(stock_defaults_value(), overlay);
    let settings: Settings = merged.try_into()?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings, reporting problems instead of hiding them.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn try_load(path: &Path) -> Result<Option<Settings>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let overlay: toml::Value = toml::from_str(&content)?;
    resolve(overlay).map(Some)
}

/// Load settings for a render. Never fails.
///
/// A missing file yields the defaults silently; an unreadable or malformed
/// file yields the defaults with a warning in the log.
pub fn load(path: &Path) -> Settings {
    match try_load(path) {
        Ok(Some(settings)) => settings,
        Ok(None) => {
            tracing::debug!("No config at {}, using defaults", path.display());
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Ignoring config at {}: {}", path.display(), e);
            Settings::default()
        }
    }
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Site Configuration
# ==================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# A file that fails to parse is ignored as a whole and the site falls back
# to these defaults; run `utility-site check` to see the parse error.

# ---------------------------------------------------------------------------
# Company
# ---------------------------------------------------------------------------
[company]
name = "Company name"
# Shown before the name in the header and before the footer tagline.
icon = "🔥"
# Home page text. Markdown is supported.
description = "A description of the company will be added soon."
tagline = "Warmth for your comfort"
# Optional second paragraph on the home page.
# additional_info = ""

# ---------------------------------------------------------------------------
# Theme
# ---------------------------------------------------------------------------
[theme]
primary_color = "#FF6B35"
secondary_color = "#E55A2B"
text_color = "#2E4053"
background_light = "#F0F2F6"
text_muted = "#5D6D7E"
# One of: classic, modern, minimal, corporate, rounded, sidebar.
style_variant = "classic"

# ---------------------------------------------------------------------------
# Navigation menu
# ---------------------------------------------------------------------------
# Each item opens one of the views: home, documents, gallery, contacts.
# When `page` is omitted the view follows the item's position in this list.
[[menu.items]]
icon = "🏠"
label = "Home"
page = "home"

[[menu.items]]
icon = "📄"
label = "Documents"
page = "documents"

[[menu.items]]
icon = "📸"
label = "Gallery"
page = "gallery"

[[menu.items]]
icon = "📞"
label = "Contacts"
page = "contacts"

# ---------------------------------------------------------------------------
# Contacts (unset fields are hidden in the sidebar)
# ---------------------------------------------------------------------------
[contacts]
# phone = "+380 00 000 00 00"
# email = "info@example.com"
# address = "1 Main Street"

# ---------------------------------------------------------------------------
# Documents: folder/filename relative to the site root
# ---------------------------------------------------------------------------
[documents.license1]
title = "License 1"
full_title = "License 1"
folder = "documents"
filename = "license1.pdf"

[documents.license2]
title = "License 2"
full_title = "License 2"
folder = "documents"
filename = "license2.pdf"

[documents.license3]
title = "License 3"
full_title = "License 3"
folder = "documents"
filename = "license3.pdf"

[documents.tariff]
title = "Heating tariffs"
full_title = "Heat supply service tariff"
folder = "documents"
filename = "tariff.pdf"

# ---------------------------------------------------------------------------
# Photo gallery
# ---------------------------------------------------------------------------
[gallery]
folder = "photos"
supported_formats = [".png", ".jpg", ".jpeg"]

# ---------------------------------------------------------------------------
# Limits
# ---------------------------------------------------------------------------
[settings]
# Larger documents are offered for download only, without inline preview.
max_pdf_size_mb = 10

# ---------------------------------------------------------------------------
# Footer
# ---------------------------------------------------------------------------
[footer]
# Defaults to "© 2024 <company name>. All rights reserved."
# copyright = ""
show_tagline = false
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn default_settings_have_every_section() {
        let settings = Settings::default();
        assert_eq!(settings.company.name, "Company name");
        assert_eq!(settings.theme.primary_color, "#FF6B35");
        assert_eq!(settings.menu.items.len(), 4);
        assert_eq!(settings.documents.tariff.filename, "tariff.pdf");
        assert_eq!(settings.gallery.folder, "photos");
        assert_eq!(settings.limits.max_pdf_size_mb, 10.0);
        assert!(!settings.footer.show_tagline);
    }

    #[test]
    fn load_returns_defaults_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let settings = load(&tmp.path().join(CONFIG_FILE));
        assert_eq!(settings.company.name, "Company name");
    }

    #[test]
    fn load_returns_defaults_for_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "this is not valid toml [[[");
        let settings = load(&path);
        assert_eq!(settings.company.name, "Company name");
        assert_eq!(settings.menu_items().len(), 4);
    }

    #[test]
    fn load_returns_defaults_for_wrong_value_type() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[settings]\nmax_pdf_size_mb = \"ten\"\n");
        let settings = load(&path);
        assert_eq!(settings.limits.max_pdf_size_mb, 10.0);
    }

    #[test]
    fn try_load_reports_malformed_file() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[company\nname = 1");
        assert!(matches!(try_load(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn try_load_none_when_absent() {
        let tmp = TempDir::new().unwrap();
        assert!(try_load(&tmp.path().join(CONFIG_FILE)).unwrap().is_none());
    }

    #[test]
    fn partial_config_keeps_other_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r##"
[company]
name = "Teplo LLC"

[theme]
primary_color = "#123456"
"##,
        );
        let settings = load(&path);
        assert_eq!(settings.company.name, "Teplo LLC");
        assert_eq!(settings.company.icon, "🔥");
        assert_eq!(settings.theme.primary_color, "#123456");
        assert_eq!(settings.theme.secondary_color, "#E55A2B");
        assert_eq!(settings.gallery.supported_formats.len(), 3);
    }

    #[test]
    fn partial_document_section_keeps_per_key_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
[documents.tariff]
filename = "tariff-2025.pdf"
"#,
        );
        let settings = load(&path);
        assert_eq!(settings.documents.tariff.filename, "tariff-2025.pdf");
        assert_eq!(settings.documents.tariff.title, "Heating tariffs");
        assert_eq!(settings.documents.tariff.folder, "documents");
        assert_eq!(settings.documents.license2.filename, "license2.pdf");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[company]\nnmae = \"typo\"\n[extra]\nx = 1\n");
        let settings = try_load(&path).unwrap().unwrap();
        assert_eq!(settings.company.name, "Company name");
    }

    #[test]
    fn menu_items_replace_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(
            &tmp,
            r#"
[[menu.items]]
icon = "🏠"
label = "Головна"

[[menu.items]]
icon = "📞"
label = "Контакти"
page = "contacts"
"#,
        );
        let settings = load(&path);
        let items = settings.menu_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].label, "Головна");
        assert_eq!(items[0].page, None);
        assert_eq!(items[1].page.as_deref(), Some("contacts"));
    }

    #[test]
    fn empty_menu_falls_back_to_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[menu]\nitems = []\n");
        let labels: Vec<String> = load(&path)
            .menu_items()
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, ["Home", "Documents", "Gallery", "Contacts"]);
    }

    #[test]
    fn menu_items_without_label_are_dropped() {
        let mut settings = Settings::default();
        settings.menu.items = vec![
            MenuItem {
                icon: "x".into(),
                label: "  ".into(),
                page: None,
            },
            MenuItem {
                icon: "y".into(),
                label: "About".into(),
                page: None,
            },
        ];
        let items = settings.menu_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].label, "About");
    }

    #[test]
    fn integer_size_limit_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[settings]\nmax_pdf_size_mb = 2\n");
        assert_eq!(load(&path).limits.max_pdf_size_mb, 2.0);
    }

    #[test]
    fn negative_size_limit_fails_validation() {
        let tmp = TempDir::new().unwrap();
        let path = write_config(&tmp, "[settings]\nmax_pdf_size_mb = -1.0\n");
        assert!(matches!(try_load(&path), Err(ConfigError::Validation(_))));
        assert_eq!(load(&path).limits.max_pdf_size_mb, 10.0);
    }

    #[test]
    fn copyright_derived_from_company_name() {
        let mut settings = Settings::default();
        settings.company.name = "Teplo".into();
        assert_eq!(settings.copyright(), "© 2024 Teplo. All rights reserved.");
        settings.footer.copyright = Some("© Teplo".into());
        assert_eq!(settings.copyright(), "© Teplo");
    }

    #[test]
    fn gallery_extensions_are_normalized() {
        let gallery = GalleryConfig {
            folder: "photos".into(),
            supported_formats: vec![".PNG".into(), "jpg".into(), "".into()],
        };
        assert_eq!(gallery.extensions(), ["png", "jpg"]);
    }

    // =========================================================================
    // merge_toml tests
    // =========================================================================

    #[test]
    fn merge_toml_deep_nested() {
        let base: toml::Value = toml::from_str(
            r##"
[documents.tariff]
title = "A"
filename = "a.pdf"
"##,
        )
        .unwrap();
        let overlay: toml::Value = toml::from_str(
            r##"
[documents.tariff]
filename = "b.pdf"
"##,
        )
        .unwrap();
        let merged = merge_toml(base, overlay);
        let tariff = merged.get("documents").unwrap().get("tariff").unwrap();
        assert_eq!(tariff.get("filename").unwrap().as_str(), Some("b.pdf"));
        assert_eq!(tariff.get("title").unwrap().as_str(), Some("A"));
    }

    #[test]
    fn merge_toml_replaces_arrays() {
        let base: toml::Value = toml::from_str(r#"formats = [".png", ".jpg"]"#).unwrap();
        let overlay: toml::Value = toml::from_str(r#"formats = [".webp"]"#).unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("formats").unwrap().as_array().unwrap().len(), 1);
    }

    // =========================================================================
    // stock_config_toml tests
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let value: toml::Value = toml::from_str(stock_config_toml()).unwrap();
        let settings = resolve(value).unwrap();
        let defaults = Settings::default();
        assert_eq!(settings.company.name, defaults.company.name);
        assert_eq!(settings.menu.items, defaults.menu.items);
        assert_eq!(settings.documents.license3.filename, "license3.pdf");
        assert_eq!(settings.limits.max_pdf_size_mb, 10.0);
        assert_eq!(settings.theme.style_variant, "classic");
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let val = stock_defaults_value();
        for section in [
            "company", "theme", "menu", "contacts", "documents", "gallery", "settings", "footer",
        ] {
            assert!(val.get(section).is_some(), "missing [{section}]");
        }
    }
}
