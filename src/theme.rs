//! Page styling derived from `[theme]`.
//!
//! The stylesheet is three layers, emitted in one `<style>` element in the
//! document head so it applies to everything rendered after it:
//!
//! 1. colour tokens as CSS custom properties on `:root`;
//! 2. the static base stylesheet (`static/style.css`, embedded at compile
//!    time), including the 768px and 480px breakpoints;
//! 3. the overrides of the selected [`StyleVariant`].

use crate::config::ThemeConfig;
use maud::{Markup, PreEscaped, html};

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Layout variants selectable with `theme.style_variant`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleVariant {
    #[default]
    Classic,
    Modern,
    Minimal,
    Corporate,
    Rounded,
    Sidebar,
}

impl StyleVariant {
    pub const ALL: [StyleVariant; 6] = [
        StyleVariant::Classic,
        StyleVariant::Modern,
        StyleVariant::Minimal,
        StyleVariant::Corporate,
        StyleVariant::Rounded,
        StyleVariant::Sidebar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleVariant::Classic => "classic",
            StyleVariant::Modern => "modern",
            StyleVariant::Minimal => "minimal",
            StyleVariant::Corporate => "corporate",
            StyleVariant::Rounded => "rounded",
            StyleVariant::Sidebar => "sidebar",
        }
    }

    /// Variant by name; unknown names fall back to classic.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(name))
            .unwrap_or_else(|| {
                tracing::warn!("Unknown style variant {name:?}, using classic");
                StyleVariant::Classic
            })
    }

    /// Class added to `<body>`.
    pub fn body_class(self) -> String {
        format!("variant-{}", self.as_str())
    }

    fn extra_css(self) -> &'static str {
        match self {
            StyleVariant::Classic => "",
            StyleVariant::Modern => {
                r#"
.variant-modern .main-header { letter-spacing: 1px; text-transform: uppercase; }
.variant-modern .sidebar { background: #1a1a2e; }
.variant-modern .nav-link { opacity: 0.8; }
.variant-modern .nav-item.current .nav-link { opacity: 1; }
.variant-modern .info-box { border-left: none; border-radius: 20px; box-shadow: 0 10px 40px rgba(0,0,0,0.1); }
.variant-modern .nav-card { border-radius: 20px; border: none; box-shadow: 0 8px 30px rgba(0,0,0,0.12); }
.variant-modern .nav-card:hover { transform: translateY(-10px); box-shadow: 0 20px 60px rgba(0,0,0,0.2); }
.variant-modern .section-header { background: none; color: var(--primary-color); border-left: 5px solid var(--primary-color); padding-left: 1rem; }
"#
            }
            StyleVariant::Minimal => {
                r#"
.variant-minimal .main-header { font-size: 1.8rem; font-weight: 400; }
.variant-minimal .sidebar { background: #fff; border-right: 1px solid #eee; }
.variant-minimal .nav-link { background: none; color: var(--text-color); font-weight: 400; }
.variant-minimal .nav-item.current .nav-link { background: none; color: var(--primary-color); border-left: 3px solid var(--primary-color); }
.variant-minimal .nav-icon { display: none; }
.variant-minimal .info-box { background: #fff; border: 1px solid #eee; border-left: 3px solid var(--primary-color); border-radius: 0; }
.variant-minimal .nav-card { border-radius: 0; border: 1px solid #eee; box-shadow: none; }
.variant-minimal .nav-card:hover { border-color: var(--primary-color); transform: none; }
.variant-minimal .section-header { background: none; font-weight: 400; border-bottom: 2px solid var(--primary-color); border-radius: 0; padding: 0.5rem 0; }
.variant-minimal .btn { border-radius: 0; }
"#
            }
            StyleVariant::Corporate => {
                r#"
.variant-corporate .main-header { text-align: left; font-size: 1.6rem; }
.variant-corporate .sidebar { background: #2c2c2c; border-right: 4px solid var(--primary-color); }
.variant-corporate .nav-link { border-radius: 0; }
.variant-corporate .nav-item.current .nav-link { background: var(--primary-color); color: #fff; border-left: none; }
.variant-corporate .info-box { border-radius: 5px; border-left: 4px solid var(--primary-color); }
.variant-corporate .nav-card { border-radius: 5px; border-top: 4px solid var(--primary-color); }
.variant-corporate .section-header { background: var(--primary-color); color: #fff; border-radius: 0; }
.variant-corporate .footer { background: #2c2c2c; color: #ccc; }
"#
            }
            StyleVariant::Rounded => {
                r#"
.variant-rounded .sidebar { border-radius: 0 30px 30px 0; }
.variant-rounded .nav-link { border-radius: 20px; }
.variant-rounded .info-box { border-radius: 30px; border: 2px solid var(--primary-color); }
.variant-rounded .nav-card { border-radius: 30px; }
.variant-rounded .section-header { border-radius: 30px; text-align: center; }
.variant-rounded .btn { border-radius: 25px; padding: 0.8rem 2rem; }
.variant-rounded .tab-btn { border-radius: 20px; margin: 0.3rem; }
.variant-rounded .tab-radio:checked + .tab-btn { background: var(--primary-color); color: #fff; border-bottom: none; }
.variant-rounded .document-section { border-radius: 20px; }
.variant-rounded .gallery-item img { border-radius: 30px; }
"#
            }
            StyleVariant::Sidebar => {
                r#"
@media (min-width: 769px) {
    .variant-sidebar .sidebar { position: fixed; left: 0; top: 0; height: 100vh; width: 220px; background: #f8f9fa; border-right: 3px solid #E0E0E0; color: var(--text-color); }
    .variant-sidebar .nav-link { background: none; color: var(--text-color); border-left: 4px solid transparent; border-radius: 0; }
    .variant-sidebar .nav-item.current .nav-link { background: #fff; color: var(--primary-color); border-left-color: var(--primary-color); }
    .variant-sidebar .content { margin-left: 220px; }
}
.variant-sidebar .section-header { background: none; color: var(--primary-color); border-left: 4px solid var(--primary-color); padding-left: 1rem; }
"#
            }
        }
    }
}

/// Colour tokens as CSS custom properties.
pub fn generate_color_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --primary-color: {primary};
    --secondary-color: {secondary};
    --text-color: {text};
    --background-light: {background_light};
    --text-muted: {text_muted};
}}"#,
        primary = theme.primary_color,
        secondary = theme.secondary_color,
        text = theme.text_color,
        background_light = theme.background_light,
        text_muted = theme.text_muted,
    )
}

/// The page-wide stylesheet for a theme and its resolved variant.
pub fn stylesheet(theme: &ThemeConfig, variant: StyleVariant) -> String {
    format!(
        "{}\n\n{}\n{}",
        generate_color_css(theme),
        CSS_STATIC,
        variant.extra_css()
    )
}

/// The `<style>` element for the document head.
pub fn apply(theme: &ThemeConfig, variant: StyleVariant) -> Markup {
    html! {
        style { (PreEscaped(stylesheet(theme, variant))) }
    }
}
